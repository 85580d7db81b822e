// Domain layer: 樣式模型、錯誤分類與對外介面 (ports)。除 std/serde 外不依賴外部系統。

pub mod error;
pub mod model;
pub mod ports;
