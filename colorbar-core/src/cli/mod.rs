pub mod conf;
pub mod serve;
pub mod watch;
