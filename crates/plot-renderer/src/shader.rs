//! The plot shader library.

use crate::error::RendererError;

/// Entry points the plot shader module exposes. Pipeline descriptors
/// naming anything else fail pipeline creation with
/// [`RendererError::FunctionNotFound`].
const ENTRY_POINTS: &[&str] = &["plot_vertex_shader", "plot_fragment_shader"];

/// The compiled plot shader module plus name-based function lookup.
pub struct ShaderLibrary {
    module: wgpu::ShaderModule,
}

impl ShaderLibrary {
    /// Compiles the embedded WGSL source into a shader module.
    pub fn new(device: &wgpu::Device) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Plot Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/plot.wgsl").into()),
        });
        Self { module }
    }

    /// Returns true if the library contains a function with this name.
    pub fn has_function(name: &str) -> bool {
        ENTRY_POINTS.contains(&name)
    }

    /// Resolves a named function to its module, or fails with the
    /// missing name.
    pub fn function(&self, name: &str) -> Result<&wgpu::ShaderModule, RendererError> {
        if Self::has_function(name) {
            Ok(&self.module)
        } else {
            Err(RendererError::FunctionNotFound(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knows_the_plot_entry_points() {
        assert!(ShaderLibrary::has_function("plot_vertex_shader"));
        assert!(ShaderLibrary::has_function("plot_fragment_shader"));
    }

    #[test]
    fn rejects_unknown_functions() {
        assert!(!ShaderLibrary::has_function("default_vertex"));
        assert!(!ShaderLibrary::has_function(""));
    }

    #[test]
    fn wgsl_source_defines_what_the_registry_lists() {
        let source = include_str!("shaders/plot.wgsl");
        for entry in ENTRY_POINTS {
            assert!(
                source.contains(&format!("fn {entry}")),
                "{entry} missing from plot.wgsl"
            );
        }
    }
}
