//! Interface layer exposing the application to the browser view.

pub mod rest;
