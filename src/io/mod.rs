// Copyright @yucwang 2026

pub mod csv;
pub mod mhd;
