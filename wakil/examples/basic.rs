//! Basic example of the Wakil DI container.
//!
//! Run with `RUST_LOG=wakil_container=debug` to watch registration and
//! resolution.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wakil::prelude::*;
use wakil::provide;

// === Define your types ===

#[derive(Clone, Debug)]
struct Config {
    database_url: String,
    debug: bool,
}

struct Database {
    url: String,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        format!("{sql} -> results from {}", self.url)
    }
}

// === Providers discovered by scanning ===

mod providers {
    use super::*;

    #[provide]
    pub fn config() -> Config {
        Config {
            database_url: "postgres://localhost/myapp".to_string(),
            debug: true,
        }
    }

    #[provide]
    pub fn database(config: Config) -> Arc<Database> {
        Arc::new(Database {
            url: config.database_url,
        })
    }
}

// === A callable object registered by hand ===

struct UserLookup;

impl Callable for UserLookup {
    type Output = String;

    fn parameters(&self) -> &[&str] {
        &["database", "user_id"]
    }

    fn call(&self, args: &Arguments) -> Result<String> {
        let database = args.cloned::<Arc<Database>>("database")?;
        let user_id = args.cloned::<u64>("user_id")?;
        Ok(database.query(&format!("SELECT * FROM users WHERE id = {user_id}")))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wakil_container=info")))
        .init();

    let container = Container::new();

    // Config and Database come from #[provide] functions.
    let discovered = container.scan(&format!("{}::providers", module_path!()))?;
    println!("Discovered {discovered} providers: {:?}", container.names());

    // Plain closures can be registered directly.
    container.register(Thing::function("user_id", &[], |_| Ok(42u64)))?;

    let config = container.get_as::<Config>("config")?;
    println!("Config: database_url={}, debug={}", config.database_url, config.debug);

    // Fully injected call.
    let lookup = Thing::instance(UserLookup);
    println!("{}", container.invoke_as::<String>(&lookup, CallArgs::new())?);

    // Caller arguments win over registered providers.
    println!(
        "{}",
        container.invoke_as::<String>(&lookup, CallArgs::new().named("user_id", 7u64))?
    );

    println!("{container:?}");
    Ok(())
}
