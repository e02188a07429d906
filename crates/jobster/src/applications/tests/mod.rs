mod access;
mod common;
