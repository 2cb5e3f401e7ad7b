use std::sync::Arc;
use std::net::SocketAddr;
use skyhold_api::{app, app_config::AppConfig, producer::run_demo_producer, AppState};
use skyhold_catalog::FlightFactory;
use skyhold_order::{MetricsAggregator, WorkerPool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyhold_api=debug,skyhold_order=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    tracing::info!("Starting Skyhold on port {}", config.server.port);

    let flight = Arc::new(FlightFactory::create(config.demo.flight_class, config.demo.seats)?);
    let metrics = Arc::new(MetricsAggregator::new());

    let (queue, pool) = WorkerPool::start(&config.engine, Arc::clone(&metrics))?;

    // Reporting surface
    let app_state = AppState {
        metrics: Arc::clone(&metrics),
        flight: Arc::clone(&flight),
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    let server = tokio::spawn(async move {
        axum::serve(listener, app(app_state))
            .with_graceful_shutdown(shutdown_signal())
            .await
    });

    if config.demo.enabled {
        let payment = config.demo.payment.build(&config.payment);
        tokio::spawn(run_demo_producer(queue, Arc::clone(&flight), payment, config.demo.requests));
    } else {
        // Nothing else feeds the engine; close the queue so the pool can stop
        drop(queue);
    }

    pool.join().await;

    let snapshot = metrics.snapshot();
    tracing::info!(
        "Booking run complete: total={} success={} failed={} timeout={} avg_latency={:?}",
        snapshot.total_requests,
        snapshot.success,
        snapshot.failed,
        snapshot.timeout,
        snapshot.average_latency
    );
    tracing::info!("Dashboard stays available until Ctrl+C");

    server.await??;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
