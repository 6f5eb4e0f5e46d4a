//! Error types for gauge-stepper.
//!
//! Configuration problems are reported once, when a profile, gauge or mapper
//! is built. The motion path itself only fails if a GPIO line does.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all gauge-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Driver or hardware error
    Driver(DriverError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A required builder field was not supplied
    MissingField(&'static str),
    /// Acceleration profile has no entries
    EmptyProfile,
    /// Acceleration profile has more entries than fit in the table
    TooManyProfileEntries(usize),
    /// Velocity ceilings are not strictly increasing
    ProfileNotIncreasing {
        /// Index of the offending entry
        index: usize,
        /// Ceiling of the previous entry
        previous: u32,
        /// Ceiling of the offending entry
        ceiling: u32,
    },
    /// Last velocity ceiling does not equal the declared maximum velocity
    ProfileMaxMismatch {
        /// Ceiling of the final entry
        last: u32,
        /// Declared maximum velocity
        max_velocity: u32,
    },
    /// Maximum velocity must be at least 1
    ZeroMaxVelocity,
    /// A profile entry has a zero tick period
    ZeroPeriod(usize),
    /// Total steps must be at least 1
    ZeroTotalSteps,
    /// Gauge name not found in configuration
    GaugeNotFound(heapless::String<32>),
    /// Mapper references a gauge that does not exist
    MapperGaugeNotFound {
        /// Mapper name
        mapper: heapless::String<32>,
        /// Referenced gauge name
        gauge: heapless::String<32>,
    },
    /// Mapper input range is empty or inverted (min must be < max)
    InvalidMapperRange {
        /// Lower bound of the input range
        min: f32,
        /// Upper bound of the input range
        max: f32,
    },
    /// Mapper step window is inverted (min must be <= max)
    InvertedMapperSteps {
        /// Lowest step the mapper may command
        min: u32,
        /// Highest step the mapper may command
        max: u32,
    },
    /// Mapper step window is inverted or does not fit the gauge
    InvalidMapperSteps {
        /// Lowest step the mapper may command
        min: u32,
        /// Highest step the mapper may command
        max: u32,
        /// Total steps of the gauge the mapper drives
        total_steps: u32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Driver operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    /// Pin operation failed
    PinError,
    /// No driver has been installed in the shared gauge yet
    NotInstalled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::EmptyProfile => write!(f, "Acceleration profile has no entries"),
            ConfigError::TooManyProfileEntries(n) => {
                write!(f, "Acceleration profile has {} entries, max is 16", n)
            }
            ConfigError::ProfileNotIncreasing { index, previous, ceiling } => write!(
                f,
                "Velocity ceiling {} at entry {} is not greater than previous ceiling {}",
                ceiling, index, previous
            ),
            ConfigError::ProfileMaxMismatch { last, max_velocity } => write!(
                f,
                "Last velocity ceiling {} does not equal max velocity {}",
                last, max_velocity
            ),
            ConfigError::ZeroMaxVelocity => write!(f, "Max velocity must be at least 1"),
            ConfigError::ZeroPeriod(index) => {
                write!(f, "Acceleration entry {} has a zero period", index)
            }
            ConfigError::ZeroTotalSteps => write!(f, "Total steps must be at least 1"),
            ConfigError::GaugeNotFound(name) => write!(f, "Gauge '{}' not found", name),
            ConfigError::MapperGaugeNotFound { mapper, gauge } => {
                write!(f, "Mapper '{}' references unknown gauge '{}'", mapper, gauge)
            }
            ConfigError::InvalidMapperRange { min, max } => {
                write!(f, "Invalid mapper range: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvertedMapperSteps { min, max } => {
                write!(f, "Invalid mapper steps: min ({}) must be <= max ({})", min, max)
            }
            ConfigError::InvalidMapperSteps { min, max, total_steps } => write!(
                f,
                "Invalid mapper steps [{}, {}] for a gauge of {} steps",
                min, max, total_steps
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::PinError => write!(f, "GPIO pin operation failed"),
            DriverError::NotInstalled => write!(f, "Gauge driver not installed"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}
