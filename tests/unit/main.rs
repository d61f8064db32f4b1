//! Unit tests mirroring the `src` module tree

mod batch;
mod io;
