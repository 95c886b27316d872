use arrest_core::ErrorResponse;
use arrest_models::arrests::{Arrest, CreateArrestRequest};
use arrest_models::auth::{
    AccessTokenResponse, LoginRequest, LoginResponse, LogoutRequest, MessageResponse,
    RefreshTokenRequest, RegisterRequest, ResendVerificationRequest, TokenPairResponse,
    VerifyUserRequest,
};
use arrest_models::organization::OrganizationCode;
use arrest_models::users::UserProfile;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::verify_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout,
        crate::modules::tokens::controller::generate_access_token,
        crate::modules::tokens::controller::generate_refresh_token,
        crate::modules::email::controller::resend_verification,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::delete_user,
        crate::modules::arrests::controller::create_arrest,
        crate::modules::arrests::controller::get_arrest,
    ),
    components(
        schemas(
            RegisterRequest,
            VerifyUserRequest,
            LoginRequest,
            LoginResponse,
            LogoutRequest,
            RefreshTokenRequest,
            AccessTokenResponse,
            TokenPairResponse,
            ResendVerificationRequest,
            MessageResponse,
            UserProfile,
            Arrest,
            CreateArrestRequest,
            OrganizationCode,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, verification, login and logout"),
        (name = "Tokens", description = "Access and refresh token exchange"),
        (name = "Email", description = "Verification email delivery"),
        (name = "Users", description = "Current user operations"),
        (name = "Arrests", description = "Arrest records")
    ),
    info(
        title = "Arrest Management API",
        version = "0.1.0",
        description = "Role-gated REST API for recording arrests, secured with JWT bearer tokens.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/v1.0/auth/registration",
            "/v1.0/auth/verify_user",
            "/v1.0/auth/login",
            "/v1.0/auth/logout",
            "/v1.0/token/generate-access-token",
            "/v1.0/token/generate-refresh-token",
            "/v1.0/email",
            "/v1.0/user/profile",
            "/v1.0/user/delete/{id}",
            "/arrestManagement/create_arrest",
            "/arrestManagement/get_arrest/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
