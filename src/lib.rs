pub mod error;
pub mod convert;

pub mod models {
    pub mod conversion;
    pub mod engine;
}

pub mod service {
    pub mod config_service;
    pub mod engine;
    pub mod work_dir;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod facade {
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod utils {
    pub mod convert;
    pub mod escape;
    pub mod file;
    pub mod tex_log;
    pub mod utils;
}

pub use convert::{convert, latex2dvi, latex2pdf, tex2dvi, tex2pdf};
pub use error::{Result, TexError};
pub use models::conversion::{ConversionRequest, ConversionOutput, EngineOptions, DEFAULT_MAX_RUNS};
pub use models::engine::{EngineSelection, InputFormat, OutputFormat, RunOutcome};
pub use utils::escape::{escape_latex, has_blank_lines};
