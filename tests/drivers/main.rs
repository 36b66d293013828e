#[cfg(feature = "azure")]
mod azure;
#[cfg(feature = "disk")]
mod disk;
mod flow;
#[cfg(feature = "inmem")]
mod inmem;
