use diesel::prelude::*;

use crate::domain::order::{NewOrderRecord, OrderRecord};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, OrderListQuery, OrderReader, OrderWriter};

impl OrderReader for DieselRepository {
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<OrderRecord>)> {
        use crate::models::order::Order as DbOrder;
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let total: i64 = orders::table.count().get_result(&mut conn)?;

        let mut select = orders::table.order(orders::id.desc()).into_boxed();
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            select = select.limit(per_page).offset((page - 1) * per_page);
        }

        let items = select
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<OrderRecord>>();

        Ok((total as usize, items))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, order: &NewOrderRecord) -> RepositoryResult<OrderRecord> {
        use crate::models::order::{NewOrder as DbNewOrder, Order as DbOrder};
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let insertable: DbNewOrder = order.into();
        let created = diesel::insert_into(orders::table)
            .values(&insertable)
            .get_result::<DbOrder>(&mut conn)?;

        Ok(created.into())
    }
}
