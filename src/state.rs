use std::collections::HashMap;
use std::sync::Mutex;
use crate::config::Config;
use crate::core::db::FixtureDb;
use crate::pages::explore::ExplorePage;
use crate::pages::home::HomePage;
use crate::pages::profile::ProfilePage;

/// Everything the server keeps between requests. Each page owns its own
/// state behind its own lock; pages never read each other's state.
pub struct AppState {
    pub config: Config,
    pub db: FixtureDb,
    pub home: Mutex<Option<HomePage>>,
    pub explore: Mutex<Option<ExplorePage>>,
    pub profiles: Mutex<HashMap<String, ProfilePage>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let db = FixtureDb::connect(&config.database);
        AppState {
            config,
            db,
            home: Mutex::new(None),
            explore: Mutex::new(None),
            profiles: Mutex::new(HashMap::new()),
        }
    }
}
