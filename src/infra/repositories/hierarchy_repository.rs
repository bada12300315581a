//! Railway network hierarchy repository: zones, divisions and stations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, Set};
use uuid::Uuid;

use super::base::{exists_where, find_mapped};
use super::entities::{self, division, station, zone};
use common::AppResult;
use domain::{Division, NewDivision, NewStation, NewZone, Station, Zone};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Hierarchy repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait HierarchyRepository: Send + Sync {
    async fn create_zone(&self, zone: NewZone) -> AppResult<Zone>;

    async fn find_zone(&self, id: Uuid) -> AppResult<Option<Zone>>;

    async fn zone_code_exists(&self, code: &str) -> AppResult<bool>;

    async fn create_division(&self, division: NewDivision) -> AppResult<Division>;

    async fn find_division(&self, id: Uuid) -> AppResult<Option<Division>>;

    async fn division_code_exists(&self, code: &str) -> AppResult<bool>;

    async fn create_station(&self, station: NewStation) -> AppResult<Station>;

    async fn find_station(&self, id: Uuid) -> AppResult<Option<Station>>;

    async fn station_code_exists(&self, code: &str) -> AppResult<bool>;
}

/// Concrete implementation of HierarchyRepository
pub struct HierarchyStore {
    db: DatabaseConnection,
}

impl HierarchyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HierarchyRepository for HierarchyStore {
    async fn create_zone(&self, new: NewZone) -> AppResult<Zone> {
        let now = chrono::Utc::now();
        let active_model = zone::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            code: Set(new.code),
            description: Set(new.description),
            headquarters: Set(new.headquarters),
            latitude: Set(entities::latitude(new.coordinates)),
            longitude: Set(entities::longitude(new.coordinates)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Zone::from(model))
    }

    async fn find_zone(&self, id: Uuid) -> AppResult<Option<Zone>> {
        find_mapped::<zone::Entity, _, _>(&self.db, id).await
    }

    async fn zone_code_exists(&self, code: &str) -> AppResult<bool> {
        exists_where::<zone::Entity, _>(&self.db, zone::Column::Code.eq(code)).await
    }

    async fn create_division(&self, new: NewDivision) -> AppResult<Division> {
        let now = chrono::Utc::now();
        let active_model = division::ActiveModel {
            id: Set(Uuid::new_v4()),
            zone_id: Set(new.zone_id),
            name: Set(new.name),
            code: Set(new.code),
            headquarters: Set(new.headquarters),
            latitude: Set(entities::latitude(new.coordinates)),
            longitude: Set(entities::longitude(new.coordinates)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Division::from(model))
    }

    async fn find_division(&self, id: Uuid) -> AppResult<Option<Division>> {
        find_mapped::<division::Entity, _, _>(&self.db, id).await
    }

    async fn division_code_exists(&self, code: &str) -> AppResult<bool> {
        exists_where::<division::Entity, _>(&self.db, division::Column::Code.eq(code)).await
    }

    async fn create_station(&self, new: NewStation) -> AppResult<Station> {
        let now = chrono::Utc::now();
        let active_model = station::ActiveModel {
            id: Set(Uuid::new_v4()),
            division_id: Set(new.division_id),
            name: Set(new.name),
            code: Set(new.code),
            station_type: Set(new.station_type),
            platform_count: Set(new.platform_count),
            latitude: Set(entities::latitude(new.coordinates)),
            longitude: Set(entities::longitude(new.coordinates)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Station::from(model))
    }

    async fn find_station(&self, id: Uuid) -> AppResult<Option<Station>> {
        find_mapped::<station::Entity, _, _>(&self.db, id).await
    }

    async fn station_code_exists(&self, code: &str) -> AppResult<bool> {
        exists_where::<station::Entity, _>(&self.db, station::Column::Code.eq(code)).await
    }
}
