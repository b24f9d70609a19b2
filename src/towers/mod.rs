pub mod container;
pub mod traits;

pub use self::container::{EtaMajorMapping, TowerContainer};
pub use self::traits::{ChannelMapping, Readings, TowerSource};
