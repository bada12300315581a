//! Shared query helpers used by every store.
//!
//! Each helper is generic over the entity and the connection so the same code
//! runs against the pool or inside an open transaction.

use sea_orm::{
    sea_query::SimpleExpr, ConnectionTrait, EntityTrait, PrimaryKeyTrait, QueryFilter,
};
use uuid::Uuid;

use common::AppResult;

/// Find a row by primary key and map it into its domain type.
pub(crate) async fn find_mapped<E, D, C>(db: &C, id: Uuid) -> AppResult<Option<D>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    D: From<E::Model>,
{
    let model = E::find_by_id(id).one(db).await?;
    Ok(model.map(D::from))
}

/// Check whether a row with the given primary key exists.
pub(crate) async fn exists<E, C>(db: &C, id: Uuid) -> AppResult<bool>
where
    C: ConnectionTrait,
    E: EntityTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    Ok(E::find_by_id(id).one(db).await?.is_some())
}

/// Check whether any row matches the filter.
pub(crate) async fn exists_where<E, C>(db: &C, filter: SimpleExpr) -> AppResult<bool>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    Ok(E::find().filter(filter).one(db).await?.is_some())
}
