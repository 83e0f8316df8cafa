// ==========================================
// 商品目录对账导出 - 引擎层
// ==========================================
// 职责: 类目解析、字段合并、两遍合并、组装与校验
// 红线: 引擎不做 I/O，不拼 SQL
// ==========================================

pub mod assembler;
pub mod category_resolver;
pub mod field_merge;
pub mod reconciler;
pub mod stats;
pub mod validator;

pub use assembler::assemble;
pub use category_resolver::{CategoryClues, CategoryResolver, ResolvedCategory};
pub use field_merge::{MergePolicy, MergedFields};
pub use reconciler::{CatalogReconciler, ReconcileOutcome};
pub use stats::{DropReason, DroppedProduct, ReconcileStats};
pub use validator::{CatalogValidator, CatalogViolation};
