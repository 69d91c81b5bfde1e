// plagcheck: cosine-similarity plagiarism checker
//
// This is the library root. `similarity` is the pure scoring core; `sink` and
// `web` are the glue that serves it over HTTP and reports results.

pub mod config;
pub mod similarity;
pub mod sink;
pub mod web;
