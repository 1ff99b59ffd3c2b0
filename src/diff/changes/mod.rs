//! Change computer implementations.
//!
//! One `ChangeComputer` per compared entity: targets, variables, panels and
//! data sources. Dashboards combine the variable and panel computers.

mod dashboards;
mod datasources;
mod panels;
mod targets;
mod variables;

pub use dashboards::DashboardChangeComputer;
pub use datasources::DataSourceChangeComputer;
pub use panels::PanelChangeComputer;
pub use targets::TargetChangeComputer;
pub use variables::VariableChangeComputer;
