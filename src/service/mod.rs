//! StudentService: pass-through façade over the record store.

mod student;
pub use student::StudentService;
