use std::error::Error;

#[path = "common/demo_tables.rs"]
mod demo_tables;

fn main() -> Result<(), Box<dyn Error>> {
    trendmine::example_apps::run_insight_demo(
        std::env::args().skip(1),
        demo_tables::build_demo_tables,
    )
}
