//! Error types for morphfield.
//!
//! This module provides error types for configuration, engine start-up,
//! GPU presentation, the windowed host and frame export.

use std::fmt;

/// Errors produced while loading or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// `particle_count` must be at least 1.
    NoParticles,
    /// `spring_stiffness` must lie strictly between 0 and 1.
    InvalidStiffness(f32),
    /// `damping` must lie strictly between 0 and 1.
    InvalidDamping(f32),
    /// `connection_radius` must be finite and non-negative.
    InvalidConnectionRadius(f32),
    /// An opacity-like option was outside `[0, 1]`.
    InvalidOpacity { option: &'static str, value: f32 },
    /// Explicit bounds must be finite and non-negative.
    InvalidBounds { width: f32, height: f32 },
    /// A color string was not of the form `#rrggbb`.
    InvalidColor(String),
    /// The configuration file could not be parsed.
    Parse(serde_json::Error),
    /// The configuration file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoParticles => write!(f, "particle_count must be greater than zero"),
            ConfigError::InvalidStiffness(v) => {
                write!(f, "spring_stiffness must be in (0, 1), got {}", v)
            }
            ConfigError::InvalidDamping(v) => write!(f, "damping must be in (0, 1), got {}", v),
            ConfigError::InvalidConnectionRadius(v) => {
                write!(f, "connection_radius must be finite and >= 0, got {}", v)
            }
            ConfigError::InvalidOpacity { option, value } => {
                write!(f, "{} must be in [0, 1], got {}", option, value)
            }
            ConfigError::InvalidBounds { width, height } => {
                write!(f, "bounds must be finite and non-negative, got {}x{}", width, height)
            }
            ConfigError::InvalidColor(s) => write!(f, "invalid color '{}', expected #rrggbb", s),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Reasons an [`Engine::start`](crate::Engine::start) attempt was rejected.
///
/// A rejected start creates no engine state; call `start` again to retry.
#[derive(Debug)]
pub enum StartError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The surface has zero width or height.
    ZeroArea { width: f32, height: f32 },
    /// The surface could not provide a drawing context.
    SurfaceUnavailable,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::Config(e) => write!(f, "Invalid engine configuration: {}", e),
            StartError::ZeroArea { width, height } => {
                write!(f, "Surface has zero area ({}x{})", width, height)
            }
            StartError::SurfaceUnavailable => write!(f, "Drawing surface is unavailable"),
        }
    }
}

impl std::error::Error for StartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for StartError {
    fn from(e: ConfigError) -> Self {
        StartError::Config(e)
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for presenting.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when saving a frame to disk.
#[derive(Debug)]
pub enum ExportError {
    /// Failed to encode the image.
    Image(image::ImageError),
    /// The pixel buffer did not match the canvas size.
    BufferSize,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Image(e) => write!(f, "Failed to write image: {}", e),
            ExportError::BufferSize => write!(f, "Pixel buffer does not match canvas size"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Image(e) => Some(e),
            ExportError::BufferSize => None,
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

/// Errors that can occur when running the windowed host.
#[derive(Debug)]
pub enum HostError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The engine refused to start.
    Start(StartError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            HostError::Window(e) => write!(f, "Failed to create window: {}", e),
            HostError::Gpu(e) => write!(f, "GPU error: {}", e),
            HostError::Start(e) => write!(f, "Engine failed to start: {}", e),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::EventLoop(e) => Some(e),
            HostError::Window(e) => Some(e),
            HostError::Gpu(e) => Some(e),
            HostError::Start(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for HostError {
    fn from(e: winit::error::EventLoopError) -> Self {
        HostError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for HostError {
    fn from(e: winit::error::OsError) -> Self {
        HostError::Window(e)
    }
}

impl From<GpuError> for HostError {
    fn from(e: GpuError) -> Self {
        HostError::Gpu(e)
    }
}

impl From<StartError> for HostError {
    fn from(e: StartError) -> Self {
        HostError::Start(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_start_error_wraps_config_source() {
        let err = StartError::from(ConfigError::NoParticles);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("particle_count"));
    }

    #[test]
    fn test_zero_area_message() {
        let err = StartError::ZeroArea { width: 0.0, height: 600.0 };
        assert_eq!(err.to_string(), "Surface has zero area (0x600)");
        assert!(err.source().is_none());
    }
}
