use diesel::prelude::*;

use crate::domain::content::{ContactSettings, Faq, FooterLinks, NewFaq, PrefooterBanner};
use crate::domain::types::FaqId;
use crate::models::content::{
    ContactSettings as DbContactSettings, Faq as DbFaq, FooterLinksRow, NewFaq as DbNewFaq,
    PrefooterBanner as DbPrefooterBanner, SINGLETON_ID,
};
use crate::repository::{ContentReader, ContentWriter, DieselRepository, RepositoryResult};

impl ContentReader for DieselRepository {
    fn get_contact_settings(&self) -> RepositoryResult<Option<ContactSettings>> {
        use crate::schema::contact_settings;

        let mut conn = self.conn()?;

        let row = contact_settings::table
            .filter(contact_settings::id.eq(SINGLETON_ID))
            .first::<DbContactSettings>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn list_faqs(&self, published_only: bool) -> RepositoryResult<Vec<Faq>> {
        use crate::schema::faqs;

        let mut conn = self.conn()?;

        let mut query = faqs::table.into_boxed::<diesel::sqlite::Sqlite>();
        if published_only {
            query = query.filter(faqs::is_published.eq(true));
        }

        let items = query
            .order((faqs::sort_order.asc(), faqs::id.asc()))
            .load::<DbFaq>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Faq>, _>>()?;

        Ok(items)
    }

    fn get_faq(&self, id: FaqId) -> RepositoryResult<Option<Faq>> {
        use crate::schema::faqs;

        let mut conn = self.conn()?;

        let faq = faqs::table
            .filter(faqs::id.eq(id.get()))
            .first::<DbFaq>(&mut conn)
            .optional()?;

        Ok(faq.map(TryInto::try_into).transpose()?)
    }

    fn get_footer_links(&self) -> RepositoryResult<Option<FooterLinks>> {
        use crate::schema::footer_links;

        let mut conn = self.conn()?;

        let row = footer_links::table
            .filter(footer_links::id.eq(SINGLETON_ID))
            .first::<FooterLinksRow>(&mut conn)
            .optional()?;

        Ok(row.map(TryInto::try_into).transpose()?)
    }

    fn get_prefooter_banner(&self) -> RepositoryResult<Option<PrefooterBanner>> {
        use crate::schema::prefooter_banner;

        let mut conn = self.conn()?;

        let row = prefooter_banner::table
            .filter(prefooter_banner::id.eq(SINGLETON_ID))
            .first::<DbPrefooterBanner>(&mut conn)
            .optional()?;

        Ok(row.map(TryInto::try_into).transpose()?)
    }
}

impl ContentWriter for DieselRepository {
    fn save_contact_settings(&self, settings: &ContactSettings) -> RepositoryResult<usize> {
        use crate::schema::contact_settings;

        let mut conn = self.conn()?;
        let row = DbContactSettings::from(settings);

        let affected = diesel::insert_into(contact_settings::table)
            .values(&row)
            .on_conflict(contact_settings::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn create_faq(&self, faq: &NewFaq) -> RepositoryResult<Faq> {
        use crate::schema::faqs;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(faqs::table)
            .values(DbNewFaq::from(faq))
            .get_result::<DbFaq>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_faq(&self, id: FaqId, faq: &NewFaq) -> RepositoryResult<Faq> {
        use crate::schema::faqs;

        let mut conn = self.conn()?;

        let updated = diesel::update(faqs::table.filter(faqs::id.eq(id.get())))
            .set(DbNewFaq::from(faq))
            .get_result::<DbFaq>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_faq(&self, id: FaqId) -> RepositoryResult<usize> {
        use crate::schema::faqs;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(faqs::table.filter(faqs::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }

    fn save_footer_links(&self, links: &FooterLinks) -> RepositoryResult<usize> {
        use crate::schema::footer_links;

        let mut conn = self.conn()?;
        let row = FooterLinksRow::try_from(links)?;

        let affected = diesel::insert_into(footer_links::table)
            .values(&row)
            .on_conflict(footer_links::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn save_prefooter_banner(&self, banner: &PrefooterBanner) -> RepositoryResult<usize> {
        use crate::schema::prefooter_banner;

        let mut conn = self.conn()?;
        let row = DbPrefooterBanner::from(banner);

        let affected = diesel::insert_into(prefooter_banner::table)
            .values(&row)
            .on_conflict(prefooter_banner::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
