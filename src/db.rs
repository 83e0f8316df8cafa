// ==========================================
// 商品目录对账导出 - SQLite 连接初始化
// ==========================================
// 目标:
// - 商品库只读打开，导出过程绝不写回源库
// - 统一 busy_timeout，避免源库被其他进程占用时立即失败
// ==========================================

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一参数
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 以只读方式打开 SQLite 连接并应用统一配置
pub fn open_readonly_connection(db_path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 检查表是否存在
pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
