use std::time::Instant;

use clap::{Parser, ValueEnum};
use serde_json::json;
use social_graph_core::{SocialConfig, SocialGraph, UserId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "social-graph-bench",
    about = "Time BFS distance queries and feed assembly on synthetic follow graphs"
)]
struct Cli {
    /// Follow-graph topology to generate
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Number of users to generate
    #[arg(long, default_value_t = 100_000)]
    users: u64,

    /// Posts written by each user before the feed is timed
    #[arg(long, default_value_t = 5)]
    posts_per_user: u64,

    /// Print one JSON object per topology instead of a table
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run every generator (default)
    All,
    /// Fan-out tree: each user follows three newer users (deep layers)
    Tree,
    /// Preferential attachment via edge sampling (celebrity hubs)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random follows
    Random,
}

type Generator = fn(u64) -> anyhow::Result<Population>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let generators: Vec<(&str, Generator)> = match cli.mode {
        Mode::Tree => vec![("Fan-out tree", gen_tree)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::All => vec![
            ("Fan-out tree", gen_tree as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
        ],
    };

    if !cli.json {
        println!("social-graph-bench");
        println!("==================");
        println!();
    }

    for (name, generator) in generators {
        run_benchmark(name, generator, &cli)?;
    }

    Ok(())
}

fn run_benchmark(name: &str, generator: Generator, cli: &Cli) -> anyhow::Result<()> {
    info!(topology = name, users = cli.users, "generating follow graph");

    let t = Instant::now();
    let population = generator(cli.users)?;
    populate_posts(&population, cli.posts_per_user)?;
    let gen_time = t.elapsed();

    let graph = &population.graph;
    let source = population.ids[0];
    let far = population.ids[population.ids.len() - 1];

    let t = Instant::now();
    let layers = graph.layered_distances(source)?;
    let bfs_time = t.elapsed();

    let max_distance = graph.max_distance(source)?;

    let t = Instant::now();
    let min_distance = graph.min_distance(source, far).ok();
    let path_time = t.elapsed();

    let layer_sizes: Vec<usize> = (1..=5u32)
        .map(|n| layers.layer(n).map_or(0, |set| set.len()))
        .collect();

    // Feed reader: the user with the most followees among the first few ids.
    let reader = population
        .ids
        .iter()
        .take(100)
        .copied()
        .max_by_key(|id| graph.degree(*id).map(|d| d.following).unwrap_or(0))
        .unwrap_or(source);
    let following = graph.degree(reader)?.following;

    let t = Instant::now();
    let first_page = graph.generate_feed(reader, 0, 10)?;
    let first_page_time = t.elapsed();

    let t = Instant::now();
    let deep_page = graph.generate_feed(reader, 100, 10)?;
    let deep_page_time = t.elapsed();

    if cli.json {
        let report = json!({
            "topology": name,
            "users": graph.user_count(),
            "follows": graph.follow_count(),
            "generate_ms": ms(gen_time),
            "bfs": {
                "reached": layers.reached(),
                "max_distance": max_distance.hops(),
                "layer_sizes": layer_sizes,
                "ms": ms(bfs_time),
            },
            "min_distance": {
                "hops": min_distance,
                "ms": ms(path_time),
            },
            "feed": {
                "reader_following": following,
                "first_page": first_page.len(),
                "first_page_ms": ms(first_page_time),
                "newest": first_page.first(),
                "deep_page": deep_page.len(),
                "deep_page_ms": ms(deep_page_time),
            },
        });
        println!("{}", report);
        return Ok(());
    }

    println!("--- {} ---", name);
    println!(
        "Generated in {:.2}s — {} users, {} follows",
        gen_time.as_secs_f64(),
        graph.user_count(),
        graph.follow_count()
    );

    println!();
    println!("{:>8} {:>12}", "layer", "users");
    println!("{:->8} {:->12}", "", "");
    for (n, size) in layer_sizes.iter().enumerate() {
        println!("{:>8} {:>12}", n + 1, size);
    }
    println!(
        "BFS reached {} users, max distance {} in {:.1}ms",
        layers.reached(),
        max_distance,
        ms(bfs_time)
    );

    match min_distance {
        Some(hops) => println!(
            "Min distance 0 → {}: {} hops in {:.1}ms",
            population.ids.len() - 1,
            hops,
            ms(path_time)
        ),
        None => println!(
            "Min distance 0 → {}: not connected ({:.1}ms)",
            population.ids.len() - 1,
            ms(path_time)
        ),
    }

    println!(
        "Feed for reader following {}: page 0 → {} posts in {:.2}ms, page 10 → {} posts in {:.2}ms",
        following,
        first_page.len(),
        ms(first_page_time),
        deep_page.len(),
        ms(deep_page_time)
    );
    println!();

    Ok(())
}

fn ms(d: std::time::Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

// ---------------------------------------------------------------------------
// Generators: O(users + follows), single-threaded, deterministic topology
// ---------------------------------------------------------------------------

/// A generated graph plus its user ids in creation order.
struct Population {
    graph: SocialGraph,
    ids: Vec<UserId>,
}

impl Population {
    fn new(user_count: u64) -> anyhow::Result<Self> {
        let user_count = user_count.max(2);
        let mut graph = SocialGraph::with_capacity(SocialConfig::default(), user_count as usize)?;
        let mut ids = Vec::with_capacity(user_count as usize);
        for i in 0..user_count {
            ids.push(graph.create_user(format!("user_{}", i))?.id());
        }
        Ok(Self { graph, ids })
    }

    fn len(&self) -> u64 {
        self.ids.len() as u64
    }

    fn follow(&mut self, follower: u64, followee: u64) -> anyhow::Result<()> {
        self.graph
            .follow(self.ids[follower as usize], self.ids[followee as usize])?;
        Ok(())
    }
}

fn populate_posts(population: &Population, posts_per_user: u64) -> anyhow::Result<()> {
    for round in 0..posts_per_user {
        for &id in &population.ids {
            population.graph.add_post(id, format!("post {}", round))?;
        }
    }
    Ok(())
}

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Fan-out tree: user i follows users 3i+1..=3i+3.
///
/// Layer sizes grow geometrically and the deepest layer sits at log3(n).
/// Exercises deep BFS with wide frontiers.
fn gen_tree(user_count: u64) -> anyhow::Result<Population> {
    let mut pop = Population::new(user_count)?;
    let n = pop.len();
    let branching = 3u64;

    for parent in 0..n {
        for k in 1..=branching {
            let child = parent * branching + k;
            if child >= n {
                return Ok(pop);
            }
            pop.follow(parent, child)?;
        }
    }

    Ok(pop)
}

/// Scale-free via edge-list sampling (O(follows), not O(n²)).
///
/// Each new user follows users picked from the endpoint list, so well-followed
/// users are more likely to gain followers. A few older users follow back.
fn gen_scale_free(user_count: u64) -> anyhow::Result<Population> {
    let mut pop = Population::new(user_count)?;
    let n = pop.len();
    let follows_per_user = 10u64;
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<u64> = Vec::with_capacity((n * follows_per_user * 2) as usize);

    // Seed: small clique of mutual follows
    let seed = 5u64.min(n);
    for i in 0..seed {
        for j in 0..seed {
            if i != j {
                pop.follow(i, j)?;
                endpoints.push(j);
            }
        }
    }

    for new_user in seed..n {
        for _ in 0..follows_per_user.min(new_user) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_user {
                pop.follow(new_user, target)?;
                endpoints.push(target);
                endpoints.push(new_user);
                // Occasional follow-back gives hubs outgoing edges too.
                if rng.next(10) == 0 {
                    pop.follow(target, new_user)?;
                }
            }
        }
    }

    Ok(pop)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each user follows its K successors on a ring; each follow is rewired to a
/// random user with probability p. High clustering, short paths.
fn gen_small_world(user_count: u64) -> anyhow::Result<Population> {
    let mut pop = Population::new(user_count)?;
    let n = pop.len();
    let k = 10u64.min(n - 1);
    let p = 0.05f64;
    let mut rng = FastRng::new(67890);

    for i in 0..n {
        for j in 1..=k {
            let neighbor = (i + j) % n;
            if rng.next_f64() < p {
                let rewired = rng.next(n);
                pop.follow(i, if rewired != i { rewired } else { neighbor })?;
            } else {
                pop.follow(i, neighbor)?;
            }
        }
    }

    Ok(pop)
}

/// Erdos-Renyi: ~10 uniform random follows per user. No structure.
fn gen_random(user_count: u64) -> anyhow::Result<Population> {
    let mut pop = Population::new(user_count)?;
    let n = pop.len();
    let mut rng = FastRng::new(54321);

    for _ in 0..n * 10 {
        let from = rng.next(n);
        let to = rng.next(n);
        if from != to {
            pop.follow(from, to)?;
        }
    }

    Ok(pop)
}
