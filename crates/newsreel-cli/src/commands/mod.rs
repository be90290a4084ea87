pub mod bookmark;
pub mod headlines;
pub mod run;
pub mod saved;
