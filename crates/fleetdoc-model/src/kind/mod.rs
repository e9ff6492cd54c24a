mod operation;
pub use operation::OperationKind;
