mod client;
mod cors;
mod helpers;
