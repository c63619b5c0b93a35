use crate::query::{
    ast::select::{Binding, Select},
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        if self.columns.is_empty() {
            r.sql.push('*');
        }
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.render_identifier(col);
        }

        // 2. FROM
        if let Some(from) = &self.from {
            r.sql.push_str(" FROM ");
            r.render_table_ref(from);
        }

        // 3. WHERE, bound restrictions first so parameter order matches marker order
        let (bound, deferred): (Vec<_>, Vec<_>) = self
            .where_clause
            .iter()
            .partition(|restriction| matches!(restriction.binding, Binding::Value(_)));

        for (i, restriction) in bound.into_iter().chain(deferred).enumerate() {
            r.sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            restriction.render(r);
        }

        // 4. ALLOW FILTERING
        if self.allow_filtering {
            r.sql.push_str(" ALLOW FILTERING");
        }
    }
}
