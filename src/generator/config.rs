//! API, menu and page descriptors deployed alongside a generated service.
//!
//! Every descriptor gets a fresh ULID, so two calls for the same Metadata
//! produce different IDs. Callers that need stable IDs within one run share
//! a [`crate::orchestrator::ConfigMemo`].

use serde::{Deserialize, Serialize};

use crate::convert::to_camel_case;
use crate::ids::EntityId;
use crate::model::{Metadata, Service};

/// API and menu descriptors for one Metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    pub apis: Vec<ApiInfo>,
    pub menu: Vec<MenuInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub id: String,
    pub path: String,
    pub group: String,
    pub method: String,
    pub description: String,
    pub enable: bool,
    pub check_auth: bool,
    pub check_login: bool,
    pub tenant_id: String,
    pub project_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuInfo {
    pub id: String,
    pub path: String,
    pub name: String,
    pub title: String,
    pub tenant_id: String,
    pub project_id: String,
    pub menu_funcs: Vec<MenuFunc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuFunc {
    pub id: String,
    pub menu_id: String,
    pub name: String,
    pub title: String,
    pub menu_func_apis: Vec<MenuFuncApi>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuFuncApi {
    pub id: String,
    pub menu_func_id: String,
    pub api_id: String,
}

/// (action, HTTP method, description)
const API_ACTIONS: [(&str, &str, &str); 11] = [
    ("add", "POST", "Create"),
    ("update", "PUT", "Update"),
    ("delete", "DELETE", "Delete"),
    ("query", "GET", "Paged query"),
    ("enable", "POST", "Enable/disable"),
    ("all", "GET", "List all"),
    ("detail", "GET", "Get detail"),
    ("copy", "POST", "Copy"),
    ("export", "GET", "Export"),
    ("import", "POST", "Import"),
    ("tree", "GET", "Query tree"),
];

/// (name prefix, name suffix, title, actions)
const MENU_FUNCS: [(&str, &str, &str, &[&str]); 11] = [
    ("Add", "", "Create", &["add"]),
    ("Update", "", "Update", &["update", "detail"]),
    ("Delete", "", "Delete", &["delete", "detail"]),
    ("Query", "", "Query", &["query"]),
    ("GetAll", "", "List all", &["all"]),
    ("GetDetail", "", "Get detail", &["detail"]),
    ("Copy", "", "Copy", &["copy"]),
    ("Enable", "", "Enable/disable", &["enable"]),
    ("Export", "", "Export", &["export"]),
    ("Import", "", "Import", &["import"]),
    ("Get", "Tree", "Query tree", &["tree"]),
];

/// `service` or `package/service`, lower-cased.
pub fn api_prefix(service: &Service) -> String {
    let name = service.name.to_lowercase();
    if service.package.is_empty() {
        name
    } else {
        format!("{}/{}", service.package.to_lowercase(), name)
    }
}

/// Generate the eleven CRUD API descriptors and the management menu for `md`.
pub fn gen_menu_config(service: &Service, md: &Metadata) -> MenuConfig {
    let prefix = api_prefix(service);
    let resource = md.name.to_lowercase();
    let camel = to_camel_case(&md.name);

    let apis: Vec<ApiInfo> = API_ACTIONS
        .iter()
        .map(|(action, method, description)| ApiInfo {
            id: EntityId::new_string(),
            path: format!("/api/{prefix}/{resource}/{action}"),
            group: md.name.clone(),
            method: method.to_string(),
            description: description.to_string(),
            enable: true,
            check_auth: true,
            check_login: true,
            tenant_id: service.tenant_id.clone(),
            project_id: service.project_id.clone(),
        })
        .collect();
    let api_id = |action: &str| {
        API_ACTIONS
            .iter()
            .position(|(a, _, _)| *a == action)
            .map(|i| apis[i].id.clone())
            .unwrap_or_default()
    };

    let menu_id = EntityId::new_string();
    let menu_funcs = MENU_FUNCS
        .iter()
        .map(|(name_prefix, name_suffix, title, actions)| {
            let func_id = EntityId::new_string();
            let menu_func_apis = actions
                .iter()
                .map(|action| MenuFuncApi {
                    id: EntityId::new_string(),
                    menu_func_id: func_id.clone(),
                    api_id: api_id(*action),
                })
                .collect();
            MenuFunc {
                id: func_id,
                menu_id: menu_id.clone(),
                name: format!("{name_prefix}{camel}{name_suffix}"),
                title: title.to_string(),
                menu_func_apis,
            }
        })
        .collect();

    let menu = MenuInfo {
        id: menu_id,
        path: format!("/curd/page/manager/{camel}?pageName={camel}"),
        name: md.display_name.clone(),
        title: md.display_name.clone(),
        tenant_id: service.tenant_id.clone(),
        project_id: service.project_id.clone(),
        menu_funcs,
    };

    MenuConfig {
        apis,
        menu: vec![menu],
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub id: String,
    pub name: String,
    pub enable: bool,
    pub metadata_id: String,
    pub page_size: u32,
    pub show_selection: bool,
    pub path: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u32,
    pub tenant_id: String,
    pub project_id: String,
    pub tool_bar: PageToolBar,
    pub buttons: Vec<PageButton>,
    pub fields: Vec<PageField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageToolBar {
    pub id: String,
    pub page_id: String,
    pub full_screen: bool,
    pub reload: bool,
    pub setting: bool,
    pub show_add: bool,
    pub show_export: bool,
    pub show_import: bool,
    pub show_batch_del: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageButton {
    pub id: String,
    pub page_id: String,
    pub key: String,
    pub label: String,
    pub script: String,
    pub enable: bool,
    pub expanded: bool,
    pub show_type: String,
    pub index: u32,
    pub show_position: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageField {
    pub id: String,
    pub page_id: String,
    pub name: String,
    pub title: String,
    pub sort: u32,
    pub show_in_table: bool,
    pub data_type: String,
}

/// (key, label, script, show type, expanded)
const PAGE_BUTTONS: [(&str, &str, &str, &str, bool); 6] = [
    ("editable", "Edit", "curdPage.showEditDialog(record)", "Dialog", false),
    ("view", "View", "", "Page", false),
    ("copy", "Copy", "", "", true),
    ("enable", "Enable", "", "", true),
    ("disable", "Disable", "", "", true),
    ("delete", "Delete", "", "", true),
];

/// Default list page for `md`: toolbar, row buttons and one column per
/// field shown in the table. Returned as a one-element list, the shape the
/// page importer expects.
pub fn gen_page_config(service: &Service, md: &Metadata) -> Vec<PageInfo> {
    let page_id = EntityId::new_string();

    let buttons = PAGE_BUTTONS
        .iter()
        .enumerate()
        .map(|(i, (key, label, script, show_type, expanded))| PageButton {
            id: EntityId::new_string(),
            page_id: page_id.clone(),
            key: key.to_string(),
            label: label.to_string(),
            script: script.to_string(),
            enable: true,
            expanded: *expanded,
            show_type: show_type.to_string(),
            index: i as u32 + 1,
            show_position: 1,
        })
        .collect();

    let fields = md
        .metadata_fields
        .iter()
        .filter(|f| f.show_in_table)
        .enumerate()
        .map(|(i, f)| PageField {
            id: EntityId::new_string(),
            page_id: page_id.clone(),
            name: f.name.clone(),
            title: f.display_name.clone(),
            sort: i as u32 + 1,
            show_in_table: true,
            data_type: "Text".to_string(),
        })
        .collect();

    let tool_bar = PageToolBar {
        id: EntityId::new_string(),
        page_id: page_id.clone(),
        full_screen: true,
        reload: true,
        setting: true,
        show_add: true,
        show_export: true,
        show_import: true,
        show_batch_del: true,
    };

    vec![PageInfo {
        id: page_id,
        name: md.name.clone(),
        enable: true,
        metadata_id: md.id.clone(),
        page_size: 15,
        show_selection: true,
        path: format!("{}/{}", api_prefix(service), md.name.to_lowercase()),
        title: md.display_name.clone(),
        description: md.display_name.clone(),
        kind: 1,
        tenant_id: service.tenant_id.clone(),
        project_id: service.project_id.clone(),
        tool_bar,
        buttons,
        fields,
    }]
}
