//! Server configuration from command-line flags and environment

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use formforge_core::{AugmentOptions, BuildOptions, DuplicateNamePolicy, PageSize};

const MIB: usize = 1024 * 1024;

#[derive(Parser, Debug, Clone)]
#[command(name = "formforge-api")]
#[command(about = "HTTP API for building fillable PDF forms")]
#[command(version)]
pub struct ServerConfig {
    /// Host address to bind to
    #[arg(long, env = "FORMFORGE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory uploaded PDFs are written to [default: <temp>/formforge-uploads]
    #[arg(long, env = "FORMFORGE_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Largest accepted PDF upload, in bytes
    #[arg(long, env = "FORMFORGE_MAX_UPLOAD_BYTES", default_value_t = 10 * MIB)]
    pub max_upload_bytes: usize,

    /// Largest accepted JSON request body, in bytes
    #[arg(long, env = "FORMFORGE_MAX_BODY_BYTES", default_value_t = 50 * MIB)]
    pub max_body_bytes: usize,

    /// Page width used when a layout carries no page size
    #[arg(long, default_value_t = PageSize::LETTER.width)]
    pub default_page_width: f64,

    /// Page height used when a layout carries no page size
    #[arg(long, default_value_t = PageSize::LETTER.height)]
    pub default_page_height: f64,

    /// How to resolve two fields with the same id: last-wins or first-wins
    #[arg(long, env = "FORMFORGE_DUPLICATE_NAMES", default_value = "last-wins")]
    pub duplicate_names: DuplicateNamePolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("formforge-uploads"))
    }

    pub fn default_page_size(&self) -> PageSize {
        PageSize::new(self.default_page_width, self.default_page_height)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            duplicate_names: self.duplicate_names,
            ..BuildOptions::default()
        }
    }

    pub fn augment_options(&self) -> AugmentOptions {
        AugmentOptions {
            duplicate_names: self.duplicate_names,
        }
    }
}
