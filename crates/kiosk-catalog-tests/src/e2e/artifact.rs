//! Build-then-serve flows: the artifact the builder writes is the exact map
//! a dispatcher later loads and serves from.
