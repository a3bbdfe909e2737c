use serde::{Deserialize, Serialize};

/// 分支实体（公司/用户的实体网点）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// 持久化前为 None，由数据库生成
    pub id: Option<i64>,
    pub name: String,
    pub user_id: i64,
    pub address: String,
    pub city: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl Branch {
    pub fn new(name: String, user_id: i64, address: String, city: String) -> Self {
        Self {
            id: None,
            name,
            user_id,
            address,
            city,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_location(mut self, latitude: Option<String>, longitude: Option<String>) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
