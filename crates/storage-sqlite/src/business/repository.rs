use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use ajo_core::business::{
    BusinessConfig, BusinessConfigRepositoryTrait, PayoutDestination,
    PayoutDestinationRepositoryTrait,
};
use ajo_core::Result;

use super::model::{BusinessConfigDB, PayoutDestinationDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{business_configs, payout_destinations};

pub struct BusinessConfigRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BusinessConfigRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BusinessConfigRepository { pool, writer }
    }
}

#[async_trait]
impl BusinessConfigRepositoryTrait for BusinessConfigRepository {
    fn get_config(&self, business_id: &str) -> Result<Option<BusinessConfig>> {
        let mut conn = get_connection(&self.pool)?;
        business_configs::table
            .find(business_id)
            .select(BusinessConfigDB::as_select())
            .first::<BusinessConfigDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(BusinessConfig::try_from)
            .transpose()
    }

    async fn upsert_config(&self, config: BusinessConfig) -> Result<BusinessConfig> {
        config.validate()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BusinessConfig> {
                let row: BusinessConfigDB = config.into();
                diesel::insert_into(business_configs::table)
                    .values(&row)
                    .on_conflict(business_configs::business_id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }
}

pub struct PayoutDestinationRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PayoutDestinationRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        PayoutDestinationRepository { pool, writer }
    }
}

#[async_trait]
impl PayoutDestinationRepositoryTrait for PayoutDestinationRepository {
    fn get_destination(&self, destination_id: &str) -> Result<Option<PayoutDestination>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(payout_destinations::table
            .find(destination_id)
            .select(PayoutDestinationDB::as_select())
            .first::<PayoutDestinationDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(PayoutDestination::from))
    }

    async fn create_destination(
        &self,
        destination: PayoutDestination,
    ) -> Result<PayoutDestination> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PayoutDestination> {
                let row: PayoutDestinationDB = destination.into();
                diesel::insert_into(payout_destinations::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }
}
