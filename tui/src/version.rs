/// The Translatica version.
///
/// Defaults to the workspace Cargo package version. Release builds may inject the tag version via
/// the `TRANSLATICA_VERSION` environment variable.
pub const TRANSLATICA_VERSION: &str = match option_env!("TRANSLATICA_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
