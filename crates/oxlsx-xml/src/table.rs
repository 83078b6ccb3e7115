//! Table XML schema structures (`xl/tables/tableN.xml`), discovery only.

use serde::{Deserialize, Serialize};

/// Root element for a table definition part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "table")]
pub struct TableXml {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "@id")]
    pub id: u32,

    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@displayName")]
    pub display_name: String,

    #[serde(rename = "@ref")]
    pub reference: String,

    #[serde(rename = "tableColumns")]
    pub table_columns: TableColumnsXml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumnsXml {
    #[serde(rename = "@count")]
    pub count: u32,

    #[serde(rename = "tableColumn")]
    pub columns: Vec<TableColumnXml>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumnXml {
    #[serde(rename = "@id")]
    pub id: u32,

    #[serde(rename = "@name")]
    pub name: String,
}
