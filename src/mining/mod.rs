pub mod apriori;
pub mod confidence_loop;
pub mod rules;
pub mod support_loop;
