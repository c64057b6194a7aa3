// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod exec_process;
pub mod fetch_http;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use exec_process::ProcessExecutor;
pub use fetch_http::HttpFetchAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use toml_config::TomlConfigAdapter;
