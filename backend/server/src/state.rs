use std::sync::Arc;

use catalog::Catalog;
use coverage::{CoverageTable, Matcher};

use super::{baas::Baas, baas::HttpBaas, config::Config};

pub struct State {
    pub config: Config,
    pub catalog: Catalog,
    pub coverage: &'static CoverageTable,
    pub baas: Arc<dyn Baas>,
}

impl State {
    pub fn new(config: Config, catalog: Catalog, baas: Arc<dyn Baas>) -> Arc<Self> {
        Arc::new(Self {
            config,
            catalog,
            coverage: CoverageTable::bay_area(),
            baas,
        })
    }

    pub fn from_config(config: Config) -> Result<Arc<Self>, catalog::CatalogError> {
        let catalog = Catalog::bundled()?;

        let baas = Arc::new(HttpBaas::new(
            &config.baas_url,
            &config.baas_anon_key,
            &config.baas_service_key,
        ));

        Ok(Self::new(config, catalog, baas))
    }

    pub fn matcher(&self) -> Matcher<'static> {
        Matcher::new(self.coverage).with_mode(self.config.match_mode)
    }
}
