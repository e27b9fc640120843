//! Data models for the bookstore

pub mod book;

pub use book::{Book, BookDto, NewBook};
