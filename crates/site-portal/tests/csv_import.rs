use std::io::Cursor;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use site_portal::evaluation::{FundSettings, RiskLevel};
use site_portal::sites::{
    FundSettingsStore, RepositoryError, SiteCsvImporter, SiteId, SitePipelineService,
    SiteRecord, SiteRepository,
};

#[derive(Default)]
struct VecRepository {
    records: Mutex<Vec<SiteRecord>>,
}

impl SiteRepository for VecRepository {
    fn insert(&self, record: SiteRecord) -> Result<SiteRecord, RepositoryError> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn update(&self, record: SiteRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record;
        Ok(())
    }

    fn fetch(&self, id: &SiteId) -> Result<Option<SiteRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<SiteRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }
}

struct FixedFund(FundSettings);

impl FundSettingsStore for FixedFund {
    fn active(&self) -> Result<FundSettings, RepositoryError> {
        Ok(self.0.clone())
    }

    fn replace(&self, _settings: FundSettings) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read-only fund".to_string()))
    }
}

const SHEET: &str = "\
Name,Location,gasVolume,gasPressure,pipelineDistance,pipelineDiameter,terrain,politicalClimate,zoning
Brazos Yard,\"Freeport, TX\",\"14,400\",600,1.2,30,moderate,receptive,by-right
Caddo Works,\"Shreveport, LA\",9600,350,6,16,difficult,hostile,rezoning-needed
,orphan row without a name,1000,,,,,,
";

#[test]
fn imported_sheet_feeds_the_pipeline() {
    let submissions = SiteCsvImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses");
    assert_eq!(submissions.len(), 2);

    let service = SitePipelineService::new(
        Arc::new(VecRepository::default()),
        Arc::new(FixedFund(FundSettings::default())),
    );
    let today = NaiveDate::from_ymd_opt(2025, 10, 6).expect("valid date");

    let ids: Vec<SiteId> = submissions
        .into_iter()
        .map(|submission| service.create(submission, today).expect("site created").id)
        .collect();

    let brazos = service.evaluate_site(&ids[0]).expect("evaluates");
    assert_eq!(brazos.name, "Brazos Yard");
    assert_eq!(brazos.result.estimated_mw, 107.0);
    assert_eq!(brazos.result.tap_cost, 500_000.0);
    assert_eq!(brazos.result.risk_level, RiskLevel::Low);

    let caddo = service.evaluate_site(&ids[1]).expect("evaluates");
    // 9,600 mcf/d at 350 psi: 50 MW baseline with the mid-pressure uplift.
    assert_eq!(caddo.result.estimated_mw, 59.0);
    assert_eq!(caddo.result.lateral_cost, 24_000_000.0);
    assert_eq!(caddo.result.risk_score, 9);
    assert_eq!(caddo.result.risk_level, RiskLevel::Medium);
}

#[test]
fn read_only_fund_store_surfaces_repository_error() {
    let service = SitePipelineService::new(
        Arc::new(VecRepository::default()),
        Arc::new(FixedFund(FundSettings::default())),
    );

    let err = service
        .replace_fund_settings(FundSettings::default())
        .expect_err("store rejects writes");
    assert!(err.to_string().contains("read-only fund"));
}
