//! Portable sensor types shared by the bridge and its collaborators.

pub mod event;
pub mod rate;
pub mod sensor_type;
