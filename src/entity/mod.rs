pub mod admin_bypass_tokens;
pub mod admins;
pub mod audit_logs;
pub mod banners;
pub mod free_website_requests;
pub mod gallery;
pub mod inquiries;
pub mod order_items;
pub mod orders;
pub mod pdfs;
pub mod products;
pub mod reviews;
pub mod site_settings;
pub mod users;
pub mod videos;
pub mod visits;

pub use admin_bypass_tokens::Entity as AdminBypassTokens;
pub use admins::Entity as Admins;
pub use audit_logs::Entity as AuditLogs;
pub use banners::Entity as Banners;
pub use free_website_requests::Entity as FreeWebsiteRequests;
pub use gallery::Entity as Gallery;
pub use inquiries::Entity as Inquiries;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use pdfs::Entity as Pdfs;
pub use products::Entity as Products;
pub use reviews::Entity as Reviews;
pub use site_settings::Entity as SiteSettings;
pub use users::Entity as Users;
pub use videos::Entity as Videos;
pub use visits::Entity as Visits;
