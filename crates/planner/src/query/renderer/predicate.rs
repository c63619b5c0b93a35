use crate::query::{
    ast::{
        predicate::Predicate,
        select::{Binding, Restriction},
    },
    renderer::{Render, Renderer},
};

impl Render for Restriction {
    fn render(&self, r: &mut Renderer) {
        render_lhs(&self.predicate, r);
        match &self.binding {
            Binding::Value(value) => r.add_param(value.clone()),
            Binding::Deferred => r.add_deferred(),
        }
    }
}

fn render_lhs(predicate: &Predicate, r: &mut Renderer) {
    r.render_identifier(&predicate.column);
    r.sql.push(' ');
    r.sql.push_str(predicate.op.as_str());
    r.sql.push(' ');
}
