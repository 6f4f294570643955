use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failure to build a simulation scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Physics error: {0}")]
    Physics(#[from] crate::physics::PhysicsError),
}
