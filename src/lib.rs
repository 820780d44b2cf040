// Library root
// -----------
// The binary (`main.rs`) wires these together into the lot updater.
//
// Module responsibilities:
// - `config`: startup settings (lot file, endpoint, update log).
// - `api`: posts the lot file to the update service and decodes the reply.
// - `presenter`: screen state machine and the text of each view.
// - `ui`: terminal front end driving the presenter.
// - `logging`: diagnostic logger setup and the append-only update log.
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod ui;
