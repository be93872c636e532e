use diesel::prelude::*;

use crate::domain::motorcycle::{NewSpecItem, SpecItem};
use crate::domain::types::MotorcycleId;
use crate::models::spec_item::{NewSpecItem as DbNewSpecItem, SpecItem as DbSpecItem};
use crate::repository::{DieselRepository, RepositoryResult, SpecItemReader, SpecItemWriter};

impl SpecItemReader for DieselRepository {
    fn list_spec_items(&self, motorcycle_id: MotorcycleId) -> RepositoryResult<Vec<SpecItem>> {
        use crate::schema::motorcycle_spec_items;

        let mut conn = self.conn()?;

        let items = motorcycle_spec_items::table
            .filter(motorcycle_spec_items::motorcycle_id.eq(motorcycle_id.get()))
            .order((
                motorcycle_spec_items::sort_order.asc(),
                motorcycle_spec_items::id.asc(),
            ))
            .load::<DbSpecItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SpecItem>, _>>()?;

        Ok(items)
    }
}

impl SpecItemWriter for DieselRepository {
    fn replace_spec_items(
        &self,
        motorcycle_id: MotorcycleId,
        items: &[NewSpecItem],
    ) -> RepositoryResult<usize> {
        use crate::schema::motorcycle_spec_items;

        let mut conn = self.conn()?;

        let rows: Vec<DbNewSpecItem> = items
            .iter()
            .enumerate()
            .map(|(index, item)| DbNewSpecItem {
                motorcycle_id: motorcycle_id.get(),
                group_name: item.group.as_str().to_string(),
                key_name: item.key.as_str().to_string(),
                value_text: item.value.clone(),
                sort_order: index as i32,
            })
            .collect();

        let affected = conn.transaction(|conn| {
            diesel::delete(
                motorcycle_spec_items::table
                    .filter(motorcycle_spec_items::motorcycle_id.eq(motorcycle_id.get())),
            )
            .execute(conn)?;

            if rows.is_empty() {
                return Ok(0);
            }

            diesel::insert_into(motorcycle_spec_items::table)
                .values(&rows)
                .execute(conn)
        })?;

        Ok(affected)
    }
}
