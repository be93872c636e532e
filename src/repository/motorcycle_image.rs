use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::motorcycle::{MotorcycleImage, NewMotorcycleImage};
use crate::domain::types::{MotorcycleId, MotorcycleImageId};
use crate::models::motorcycle_image::{
    MotorcycleImage as DbMotorcycleImage, NewMotorcycleImage as DbNewMotorcycleImage,
};
use crate::repository::{
    DieselRepository, MotorcycleImageReader, MotorcycleImageWriter, RepositoryError,
    RepositoryResult,
};

impl MotorcycleImageReader for DieselRepository {
    fn list_motorcycle_images(
        &self,
        motorcycle_id: MotorcycleId,
    ) -> RepositoryResult<Vec<MotorcycleImage>> {
        use crate::schema::motorcycle_images;

        let mut conn = self.conn()?;

        let items = motorcycle_images::table
            .filter(motorcycle_images::motorcycle_id.eq(motorcycle_id.get()))
            .order((
                motorcycle_images::sort_order.asc(),
                motorcycle_images::id.asc(),
            ))
            .load::<DbMotorcycleImage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<MotorcycleImage>, _>>()?;

        Ok(items)
    }

    fn get_motorcycle_image(
        &self,
        id: MotorcycleImageId,
    ) -> RepositoryResult<Option<MotorcycleImage>> {
        use crate::schema::motorcycle_images;

        let mut conn = self.conn()?;

        let image = motorcycle_images::table
            .filter(motorcycle_images::id.eq(id.get()))
            .first::<DbMotorcycleImage>(&mut conn)
            .optional()?;

        Ok(image.map(TryInto::try_into).transpose()?)
    }
}

impl MotorcycleImageWriter for DieselRepository {
    fn add_motorcycle_image(
        &self,
        image: &NewMotorcycleImage,
    ) -> RepositoryResult<MotorcycleImage> {
        use crate::schema::motorcycle_images;

        let mut conn = self.conn()?;
        let motorcycle_id = image.motorcycle_id.get();

        let created = conn.transaction::<_, RepositoryError, _>(|conn| {
            if image.is_primary {
                diesel::update(
                    motorcycle_images::table
                        .filter(motorcycle_images::motorcycle_id.eq(motorcycle_id)),
                )
                .set(motorcycle_images::is_primary.eq(false))
                .execute(conn)?;
            }

            let max_order = motorcycle_images::table
                .filter(motorcycle_images::motorcycle_id.eq(motorcycle_id))
                .select(diesel::dsl::max(motorcycle_images::sort_order))
                .first::<Option<i32>>(conn)?;

            let row = DbNewMotorcycleImage {
                motorcycle_id,
                path: image.path.clone(),
                alt: image.alt.clone(),
                sort_order: max_order.map_or(0, |max| max + 1),
                is_primary: image.is_primary,
            };

            Ok(diesel::insert_into(motorcycle_images::table)
                .values(&row)
                .get_result::<DbMotorcycleImage>(conn)?)
        })?;

        Ok(created.try_into()?)
    }

    fn set_primary_image(
        &self,
        motorcycle_id: MotorcycleId,
        image_id: MotorcycleImageId,
    ) -> RepositoryResult<usize> {
        use crate::schema::motorcycle_images;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let owned = motorcycle_images::table
                .filter(motorcycle_images::id.eq(image_id.get()))
                .filter(motorcycle_images::motorcycle_id.eq(motorcycle_id.get()))
                .count()
                .get_result::<i64>(conn)?;
            if owned == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::update(
                motorcycle_images::table
                    .filter(motorcycle_images::motorcycle_id.eq(motorcycle_id.get())),
            )
            .set(motorcycle_images::is_primary.eq(false))
            .execute(conn)?;

            Ok(diesel::update(
                motorcycle_images::table.filter(motorcycle_images::id.eq(image_id.get())),
            )
            .set(motorcycle_images::is_primary.eq(true))
            .execute(conn)?)
        })
    }

    fn reorder_motorcycle_images(
        &self,
        motorcycle_id: MotorcycleId,
        ids: &[MotorcycleImageId],
    ) -> RepositoryResult<usize> {
        use crate::schema::motorcycle_images;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let existing: HashSet<i32> = motorcycle_images::table
                .filter(motorcycle_images::motorcycle_id.eq(motorcycle_id.get()))
                .select(motorcycle_images::id)
                .load::<i32>(conn)?
                .into_iter()
                .collect();

            let requested: HashSet<i32> = ids.iter().map(|id| id.get()).collect();
            if requested.len() != ids.len() || requested != existing {
                return Err(RepositoryError::ValidationError(
                    "image order must list every image of the motorcycle exactly once"
                        .to_string(),
                ));
            }

            let mut affected = 0;
            for (index, id) in ids.iter().enumerate() {
                affected += diesel::update(
                    motorcycle_images::table.filter(motorcycle_images::id.eq(id.get())),
                )
                .set(motorcycle_images::sort_order.eq(index as i32))
                .execute(conn)?;
            }
            Ok(affected)
        })
    }

    fn delete_motorcycle_image(&self, id: MotorcycleImageId) -> RepositoryResult<usize> {
        use crate::schema::motorcycle_images;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(motorcycle_images::table.filter(motorcycle_images::id.eq(id.get())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
