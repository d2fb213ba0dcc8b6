/// Default input limit: 1GB
pub const DEFAULT_MAX_INPUT_SIZE: usize = 1024 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub max_input_size: usize,
    pub verify_checksum: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            verify_checksum: true,
        }
    }
}
