//! UI module - reusable widgets shared across the app's panels

pub mod components;
