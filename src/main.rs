use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header::{self, HeaderName};
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use suggestion_board_backend::config::{ClientConfig, OAuthConfig, PasswordConfig, ServerConfig};
use suggestion_board_backend::db::Database;
use suggestion_board_backend::middlewares::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use suggestion_board_backend::repositories::users::MongoUserRepository;
use suggestion_board_backend::routes::configure_all_routes;
use suggestion_board_backend::services::auth::TokenService;
use suggestion_board_backend::services::AppServices;

#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 제안 게시판 백엔드 시작중...");

    let services = initialize_services().await.map_err(|e| {
        error!("서비스 초기화 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(services).await
}

async fn initialize_services() -> Result<AppServices, suggestion_board_backend::errors::AppError> {
    // 비밀값은 기동 시 한 번만 읽습니다
    let token_service = TokenService::from_config()?;
    let oauth_state_secret = OAuthConfig::state_secret()?;

    info!("📡 데이터베이스 연결 중...");
    let database = Database::new().await?;
    info!("✅ MongoDB 연결 성공");

    let user_repo = Arc::new(MongoUserRepository::new(&database));
    user_repo.create_indexes().await?;

    Ok(AppServices::new(
        user_repo,
        token_service,
        PasswordConfig::bcrypt_cost(),
        oauth_state_secret,
    ))
}

async fn start_http_server(services: AppServices) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "Rate limit 설정이 올바르지 않습니다")
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(|cfg| services.configure(cfg))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 클라이언트 origin 허용, 토큰 헤더 송수신 허용
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin(&ClientConfig::origin())
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            HeaderName::from_static(ACCESS_TOKEN_HEADER),
            HeaderName::from_static(REFRESH_TOKEN_HEADER),
        ])
        .expose_headers(vec![
            HeaderName::from_static(ACCESS_TOKEN_HEADER),
            HeaderName::from_static(REFRESH_TOKEN_HEADER),
        ])
        .supports_credentials()
        .max_age(3600)
}

fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
