use tower_consul::prelude::*;
use tracing_subscriber::EnvFilter;

// Configuration - CONSUL_HTTP_ADDR / CONSUL_HTTP_TOKEN override these defaults
const SERVICE_ID: &str = "demo-web-1";
const SERVICE_NAME: &str = "demo-web";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging; RUST_LOG=tower_consul=debug shows every request
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🚀 Tower-Consul Agent Client Example\n");

    let mut client = ConsulClientBuilder::from_env()?.build()?;
    println!("✓ Client configured for: {}\n", client.config().agent_url);

    // Step 1: Ask the agent about itself
    println!("📋 Querying agent...");
    match client.agent_self().await {
        Ok(info) => {
            if let Some(config) = info.get("Config") {
                let field = |key: &str| config.get(key).and_then(|v| v.as_str()).unwrap_or("?");
                println!("✓ Node: {}", field("NodeName"));
                println!("  Datacenter: {}", field("Datacenter"));
            }
            println!();
        }
        Err(e) => {
            eprintln!(
                r#"✗ Failed to query agent: {e}

    Note: Make sure CONSUL_HTTP_ADDR points to a running agent"#
            );
            return Ok(());
        }
    }

    // Step 2: Gossip members
    println!("👥 LAN members:");
    for AgentMember { name, addr, port, status, .. } in client.members(false).await? {
        println!("  - {name} at {addr}:{port} (status {status})");
    }

    // Step 3: Register a service with a TTL check and keep it passing
    println!("\n📝 Registering {SERVICE_ID}...");
    let registration = AgentServiceRegistration::new(SERVICE_NAME)
        .with_id(SERVICE_ID)
        .with_tags(["demo", "v1"])
        .with_port(8080)
        .with_check(AgentServiceCheck::ttl("30s"));
    client.service_register(registration).await?;
    client
        .pass_ttl(format!("service:{SERVICE_ID}"), Some("demo is healthy".into()))
        .await?;

    // Step 4: List what the agent now knows about
    println!("\n📚 Local services:");
    for (id, AgentService { service, tags, port, .. }) in client.services().await? {
        println!("  - {id}: {service} port {port} tags {tags:?}");
    }

    println!("\n🩺 Local checks:");
    for (id, AgentCheck { status, output, .. }) in client.checks().await? {
        println!("  - {id}: {status} {output}");
    }

    // Step 5: Clean up
    client.service_deregister(SERVICE_ID).await?;
    println!("\n✅ Deregistered {SERVICE_ID}, example completed successfully!");

    Ok(())
}
