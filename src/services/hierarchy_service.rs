//! Hierarchy service - zones, divisions and stations of the railway network.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Coordinates, Division, NewDivision, NewStation, NewZone, Station, Zone};

use crate::infra::HierarchyRepository;

/// Hierarchy service trait for dependency injection.
#[async_trait]
pub trait HierarchyService: Send + Sync {
    async fn create_zone(&self, zone: NewZone) -> AppResult<Zone>;

    async fn get_zone(&self, id: Uuid) -> AppResult<Zone>;

    /// Create a division under an existing zone
    async fn create_division(&self, division: NewDivision) -> AppResult<Division>;

    async fn get_division(&self, id: Uuid) -> AppResult<Division>;

    /// Create a station under an existing division
    async fn create_station(&self, station: NewStation) -> AppResult<Station>;

    async fn get_station(&self, id: Uuid) -> AppResult<Station>;
}

pub struct HierarchyManager {
    repo: Arc<dyn HierarchyRepository>,
}

impl HierarchyManager {
    pub fn new(repo: Arc<dyn HierarchyRepository>) -> Self {
        Self { repo }
    }
}

pub(crate) fn validate_coordinates(coordinates: Option<&Coordinates>) -> AppResult<()> {
    if let Some(coordinates) = coordinates {
        coordinates.validate()?;
    }
    Ok(())
}

#[async_trait]
impl HierarchyService for HierarchyManager {
    async fn create_zone(&self, zone: NewZone) -> AppResult<Zone> {
        validate_coordinates(zone.coordinates.as_ref())?;

        if self.repo.zone_code_exists(&zone.code).await? {
            return Err(AppError::conflict(format!("Zone code '{}'", zone.code)));
        }

        let zone = self.repo.create_zone(zone).await?;
        tracing::info!(zone_id = %zone.id, code = %zone.code, "Zone created");
        Ok(zone)
    }

    async fn get_zone(&self, id: Uuid) -> AppResult<Zone> {
        self.repo.find_zone(id).await?.ok_or_not_found("Zone")
    }

    async fn create_division(&self, division: NewDivision) -> AppResult<Division> {
        validate_coordinates(division.coordinates.as_ref())?;

        self.repo
            .find_zone(division.zone_id)
            .await?
            .ok_or_not_found("Zone")?;

        if self.repo.division_code_exists(&division.code).await? {
            return Err(AppError::conflict(format!(
                "Division code '{}'",
                division.code
            )));
        }

        let division = self.repo.create_division(division).await?;
        tracing::info!(
            division_id = %division.id,
            zone_id = %division.zone_id,
            code = %division.code,
            "Division created"
        );
        Ok(division)
    }

    async fn get_division(&self, id: Uuid) -> AppResult<Division> {
        self.repo.find_division(id).await?.ok_or_not_found("Division")
    }

    async fn create_station(&self, station: NewStation) -> AppResult<Station> {
        validate_coordinates(station.coordinates.as_ref())?;

        self.repo
            .find_division(station.division_id)
            .await?
            .ok_or_not_found("Division")?;

        if self.repo.station_code_exists(&station.code).await? {
            return Err(AppError::conflict(format!("Station code '{}'", station.code)));
        }

        let station = self.repo.create_station(station).await?;
        tracing::info!(station_id = %station.id, code = %station.code, "Station created");
        Ok(station)
    }

    async fn get_station(&self, id: Uuid) -> AppResult<Station> {
        self.repo.find_station(id).await?.ok_or_not_found("Station")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockHierarchyRepository;
    use chrono::Utc;

    fn new_zone(code: &str) -> NewZone {
        NewZone {
            name: "Southern Railway".to_string(),
            code: code.to_string(),
            description: None,
            headquarters: Some("Chennai".to_string()),
            coordinates: Some(Coordinates {
                lat: 13.0827,
                lng: 80.2707,
            }),
        }
    }

    fn zone_from(new: NewZone) -> Zone {
        Zone {
            id: Uuid::new_v4(),
            name: new.name,
            code: new.code,
            description: new.description,
            headquarters: new.headquarters,
            coordinates: new.coordinates,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn creates_zone_with_unique_code() {
        let mut repo = MockHierarchyRepository::new();
        repo.expect_zone_code_exists().returning(|_| Ok(false));
        repo.expect_create_zone().returning(|new| Ok(zone_from(new)));

        let service = HierarchyManager::new(Arc::new(repo));
        let zone = service.create_zone(new_zone("SR")).await.unwrap();

        assert_eq!(zone.code, "SR");
    }

    #[tokio::test]
    async fn duplicate_zone_code_conflicts() {
        let mut repo = MockHierarchyRepository::new();
        repo.expect_zone_code_exists().returning(|_| Ok(true));
        repo.expect_create_zone().never();

        let service = HierarchyManager::new(Arc::new(repo));
        let err = service.create_zone(new_zone("SR")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(msg) if msg.contains("SR")));
    }

    #[tokio::test]
    async fn zone_with_invalid_coordinates_is_rejected() {
        let mut repo = MockHierarchyRepository::new();
        repo.expect_zone_code_exists().never();

        let mut zone = new_zone("SR");
        zone.coordinates = Some(Coordinates { lat: 95.0, lng: 0.0 });

        let service = HierarchyManager::new(Arc::new(repo));
        let err = service.create_zone(zone).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn division_requires_existing_zone() {
        let mut repo = MockHierarchyRepository::new();
        repo.expect_find_zone().returning(|_| Ok(None));
        repo.expect_create_division().never();

        let service = HierarchyManager::new(Arc::new(repo));
        let err = service
            .create_division(NewDivision {
                zone_id: Uuid::new_v4(),
                name: "Chennai Division".to_string(),
                code: "MAS".to_string(),
                headquarters: None,
                coordinates: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(entity) if entity == "Zone"));
    }

    #[tokio::test]
    async fn missing_station_is_not_found() {
        let mut repo = MockHierarchyRepository::new();
        repo.expect_find_station().returning(|_| Ok(None));

        let service = HierarchyManager::new(Arc::new(repo));
        let err = service.get_station(Uuid::new_v4()).await.unwrap_err();

        assert_eq!(err.to_string(), "Station not found");
    }
}
