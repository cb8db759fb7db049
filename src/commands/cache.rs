use crate::core::{
    cache::Namespace, command_init::CommandInit, config::AppConfig, error::Result,
    print_success,
};

/// Remove expired and unreadable entries
pub fn execute_cache_sweep() -> Result<()> {
    let config = AppConfig::load_or_create()?;
    let mut cache = CommandInit::open_cache(&config);
    let removed = cache.sweep_expired();
    print_success(&format!(
        "Removed {removed} expired cache entries, {} remain",
        cache.len()
    ));
    Ok(())
}

pub fn execute_cache_clear(namespace: Option<String>) -> Result<()> {
    let namespace = namespace
        .as_deref()
        .map(str::parse::<Namespace>)
        .transpose()?;

    let config = AppConfig::load_or_create()?;
    let mut cache = CommandInit::open_cache(&config);
    let removed = match namespace {
        Some(namespace) => cache.clear_namespace(namespace),
        None => cache.clear_all(),
    };

    let scope = namespace.map_or_else(|| "all namespaces".to_string(), |ns| ns.to_string());
    print_success(&format!("Removed {removed} cache entries ({scope})"));
    Ok(())
}
