//! loyalty-runner: headless runner for the loyalty modeling engine.
//!
//! Usage:
//!   loyalty-runner --scenario demo.json --data-dir ./data
//!   loyalty-runner --scenario demo.json --json
//!   loyalty-runner --ipc-mode

use anyhow::Result;
use loyalty_core::{
    command::{CommandOutcome, ScenarioCommand},
    config::ModelConfig,
    engine::{LoyaltyModel, ModelReport},
    scenario::Scenario,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetReport,
    Command { command: ScenarioCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<CommandOutcome>,
    report:  &'a ModelReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json = args.iter().any(|a| a == "--json");
    let data_dir = parse_arg(&args, "--data-dir").unwrap_or("./data");
    let scenario_path = parse_arg(&args, "--scenario");

    let config = ModelConfig::load_or_default(data_dir)?;
    let model = LoyaltyModel::new(config);
    let mut scenario = match scenario_path {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    log::info!(
        "runner: {} campaign(s), assumptions from {data_dir}",
        scenario.campaigns.len()
    );

    if ipc_mode {
        return run_ipc_loop(&model, &mut scenario);
    }

    let report = scenario.report(&model);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Loyalty Program Model: loyalty-runner");
        println!("  generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!("  scenario:  {}", scenario_path.unwrap_or("(built-in default)"));
        println!("  data_dir:  {data_dir}");
        println!();
        print_summary(&report, &model);
    }

    Ok(())
}

fn run_ipc_loop(model: &LoyaltyModel, scenario: &mut Scenario) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("runner: bad request: {e}");
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetReport => {
                let report = scenario.report(model);
                let response = IpcResponse { outcome: None, report: &report };
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            }
            IpcRequest::Command { command } => match scenario.apply(command, model) {
                Ok(outcome) => {
                    let report = scenario.report(model);
                    let response = IpcResponse { outcome: Some(outcome), report: &report };
                    writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                }
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(report: &ModelReport, model: &LoyaltyModel) {
    let p = &report.program;
    let e = &report.earning_rate;

    println!("=== BASE PROGRAM ===");
    println!("  monthly revenue:     {:.2}", p.monthly_revenue);
    println!("  reward budget:       {:.2}", p.reward_budget_amount);
    println!("  total monthly cost:  {:.2}", p.total_monthly_cost);
    println!("  cost / revenue:      {:.2}%", p.cost_to_revenue_ratio);
    println!("  net profit:          {:.2}", p.base_net_profit);
    println!("  ROI:                 {:.2}%", p.base_roi_pct);
    println!(
        "  margin safety:       {:.1} pts ({})",
        p.margin_safety,
        if p.is_safe { "safe" } else { "at risk" }
    );
    if p.is_revenue_too_small {
        println!("  WARNING: fixed cost is {:.1}% of revenue", p.fixed_cost_ratio);
    }
    println!(
        "  break-even:          {:.2}% uplift, {} extra transactions",
        p.break_even_uplift_pct, p.additional_transactions_needed
    );
    println!(
        "  earning rate:        {} per point (suggested {:.1})",
        p.points_per_currency_unit, e.recommended
    );
    println!("  tier what-if ROI:    {:.2}%", p.tier.tier_roi_pct);

    println!();
    println!("=== CAMPAIGNS ===");
    for m in &report.campaigns {
        println!(
            "  [{}] #{} {:<28} {:>6} participants | cost {:>10.2} | net {:>10.2} | ROI {:>8.2}%",
            if m.enabled { "x" } else { " " },
            m.id,
            m.name,
            m.participants,
            m.total_cost,
            m.net_profit,
            m.roi_pct
        );
    }

    let c = &report.portfolio;
    println!();
    println!("=== COMBINED ({} enabled) ===", c.enabled_count);
    println!("  revenue:     {:.2}", c.combined_revenue);
    println!("  cost:        {:.2}", c.combined_cost);
    println!("  net profit:  {:.2}", c.combined_net_profit);
    println!("  ROI:         {:.2}%", c.combined_roi_pct);
    for insight in &report.insights {
        println!("  - {}", insight.message());
    }

    let trigger = model.config.optimizer.trigger_roi_pct;
    let candidates: Vec<String> = report
        .optimization_candidates(trigger)
        .map(|m| format!("#{} {}", m.id, m.name))
        .collect();
    if !candidates.is_empty() {
        println!();
        println!("=== OPTIMIZATION CANDIDATES (ROI <= {trigger:.0}%) ===");
        for c in candidates {
            println!("  {c}");
        }
    }
}

fn parse_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
