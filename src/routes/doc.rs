use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{
            AdminList, AdminLoginRequest, BypassTokenResponse, CreateAdminRequest, LoginRequest,
            LoginResponse, RedeemBypassRequest, RegisterRequest, UpdateAdminRequest,
            UpdateUserStatusRequest, UserList,
        },
        content::{
            BannerList, BannerPayload, GalleryList, GalleryPayload, PdfList, PdfPayload,
            VideoList, VideoPayload,
        },
        dashboard::{DashboardStats, RevenueSeries},
        leads::{
            CreateFreeWebsiteRequest, CreateInquiryRequest, FreeWebsiteRequestList,
            InquiryList, InquiryProduct, UpdateLeadStatusRequest,
        },
        orders::{
            CartLine, CreateOrderRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
        },
        products::{AdjustStockRequest, ProductList, ProductPayload, UpdateProductRequest},
        reviews::{CreateReviewRequest, ReviewList, UpdateReviewStatusRequest},
        settings::{RecordVisitRequest, SettingsMap, UpsertSettingRequest, VisitCount},
    },
    models::{
        Admin, Banner, BannerPosition, FreeWebsiteRequest, GalleryItem, Inquiry, LeadStatus,
        Order, OrderItem, OrderStatus, PaymentStatus, Pdf, Product, RecordStatus, RevenuePoint,
        Review, ReviewStatus, User, Video,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, content, health, leads, orders, params, products, reviews, site},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::admin_login,
        auth::redeem_bypass,
        products::list_products,
        products::get_product,
        orders::create_order,
        orders::my_orders,
        content::list_banners,
        content::list_gallery,
        content::list_videos,
        content::list_pdfs,
        reviews::list_reviews,
        reviews::submit_review,
        leads::create_inquiry,
        leads::create_free_website_request,
        site::list_settings,
        site::download_vcard,
        site::record_visit,
        admin::dashboard::stats,
        admin::dashboard::revenue,
        admin::dashboard::recent_orders,
        admin::orders::list_orders,
        admin::orders::get_order,
        admin::orders::update_order_status,
        admin::orders::update_payment_status,
        admin::catalog::list_products,
        admin::catalog::create_product,
        admin::catalog::get_product,
        admin::catalog::update_product,
        admin::catalog::adjust_stock,
        admin::catalog::delete_product,
        admin::content::list_banners,
        admin::content::create_banner,
        admin::content::get_banner,
        admin::content::update_banner,
        admin::content::delete_banner,
        admin::content::list_gallery,
        admin::content::create_gallery_item,
        admin::content::get_gallery_item,
        admin::content::update_gallery_item,
        admin::content::delete_gallery_item,
        admin::content::list_videos,
        admin::content::create_video,
        admin::content::get_video,
        admin::content::update_video,
        admin::content::delete_video,
        admin::content::list_pdfs,
        admin::content::create_pdf,
        admin::content::get_pdf,
        admin::content::update_pdf,
        admin::content::delete_pdf,
        admin::moderation::list_reviews,
        admin::moderation::get_review,
        admin::moderation::update_review_status,
        admin::moderation::delete_review,
        admin::moderation::list_inquiries,
        admin::moderation::get_inquiry,
        admin::moderation::update_inquiry_status,
        admin::moderation::delete_inquiry,
        admin::moderation::list_free_website_requests,
        admin::moderation::get_free_website_request,
        admin::moderation::update_free_website_request_status,
        admin::moderation::delete_free_website_request,
        admin::accounts::list_users,
        admin::accounts::get_user,
        admin::accounts::update_user_status,
        admin::accounts::delete_user,
        admin::accounts::list_admins,
        admin::accounts::get_admin,
        admin::accounts::update_admin,
        admin::accounts::create_admin,
        admin::accounts::delete_admin,
        admin::accounts::issue_bypass_token,
        admin::accounts::upsert_setting
    ),
    components(
        schemas(
            Product,
            Order,
            OrderItem,
            Banner,
            Review,
            GalleryItem,
            Video,
            Pdf,
            Inquiry,
            FreeWebsiteRequest,
            Admin,
            User,
            RevenuePoint,
            OrderStatus,
            PaymentStatus,
            RecordStatus,
            ReviewStatus,
            LeadStatus,
            BannerPosition,
            CartLine,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
            OrderList,
            OrderWithItems,
            ProductPayload,
            UpdateProductRequest,
            AdjustStockRequest,
            ProductList,
            BannerPayload,
            GalleryPayload,
            VideoPayload,
            PdfPayload,
            BannerList,
            GalleryList,
            VideoList,
            PdfList,
            CreateReviewRequest,
            UpdateReviewStatusRequest,
            ReviewList,
            InquiryProduct,
            CreateInquiryRequest,
            CreateFreeWebsiteRequest,
            UpdateLeadStatusRequest,
            InquiryList,
            FreeWebsiteRequestList,
            RegisterRequest,
            LoginRequest,
            AdminLoginRequest,
            CreateAdminRequest,
            UpdateAdminRequest,
            LoginResponse,
            BypassTokenResponse,
            RedeemBypassRequest,
            UpdateUserStatusRequest,
            UserList,
            AdminList,
            DashboardStats,
            RevenueSeries,
            SettingsMap,
            UpsertSettingRequest,
            RecordVisitRequest,
            VisitCount,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            params::StatusQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<DashboardStats>,
            ApiResponse<RevenueSeries>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Content", description = "Banners, gallery, videos and PDFs"),
        (name = "Reviews", description = "Customer reviews"),
        (name = "Leads", description = "Inquiries and free website requests"),
        (name = "Site", description = "Site settings, vCard and visits"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Admin", description = "Back-office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
