use crate::infra::{parse_state, InMemoryKpiRepository, InMemoryPipelineRepository, OutreachDesk};
use chrono::Utc;
use clap::Args;
use dealcommand::config::DEFAULT_SENDER_NAME;
use dealcommand::error::AppError;
use dealcommand::workflows::deal::{
    analyze_deal, DealAnalysis, DealInput, FlipRequest, RentalRequest,
};
use dealcommand::workflows::leads::{asking_price_ratio, LeadQualificationInput};
use dealcommand::workflows::market::{evaluate_market, MarketData, MarketScore};
use dealcommand::workflows::money::format_usd;
use dealcommand::workflows::outreach::{EmailMessage, ListingLinks, OutreachBatch, SmsMessage};
use dealcommand::workflows::pipeline::{
    ChecklistItem, KpiMetric, KpiReport, LeadDraft, LeadSource, LeadStatus, PipelineService,
    QualifyLeadRequest, SaveDealRequest,
};
use dealcommand::workflows::reference::{detect_keywords, UsState};
use dealcommand::workflows::scripts::OutreachScripts;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MarketArgs {
    #[arg(long)]
    pub(crate) city: String,
    /// Two-letter state code
    #[arg(long, value_parser = parse_state)]
    pub(crate) state: UsState,
    #[arg(long)]
    pub(crate) msa_population: f64,
    #[arg(long)]
    pub(crate) city_population: f64,
    #[arg(long)]
    pub(crate) median_price: f64,
    #[arg(long)]
    pub(crate) days_on_market: f64,
    /// Pending-to-active listings as a percentage
    #[arg(long)]
    pub(crate) pending_ratio: f64,
}

#[derive(Args, Debug)]
pub(crate) struct DealArgs {
    #[arg(long)]
    pub(crate) address: String,
    #[arg(long)]
    pub(crate) list_price: f64,
    #[arg(long)]
    pub(crate) zestimate: f64,
    #[arg(long)]
    pub(crate) repair_estimate: f64,
    #[arg(long)]
    pub(crate) arv: f64,
    /// Motivated-seller keyword seen on the listing (repeatable)
    #[arg(long = "keyword")]
    pub(crate) keywords: Vec<String>,
    #[arg(long, default_value_t = 0)]
    pub(crate) days_on_market: u32,
    /// Seller motivation on a 1-10 scale
    #[arg(long, default_value_t = 5)]
    pub(crate) seller_motivation: i32,
    /// Months held before resale in the flip projection
    #[arg(long, default_value_t = 6)]
    pub(crate) holding_months: u32,
    /// Expected monthly rent; adds a buy-and-hold projection
    #[arg(long)]
    pub(crate) monthly_rent: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Name signed on the generated outreach
    #[arg(long)]
    pub(crate) sender_name: Option<String>,
    /// Stop after qualification and skip the outreach batch
    #[arg(long)]
    pub(crate) skip_outreach: bool,
}

pub(crate) fn run_market_report(args: MarketArgs) -> Result<(), AppError> {
    let data = MarketData {
        city: args.city,
        state: args.state,
        msa_population: args.msa_population,
        city_population: args.city_population,
        median_price: args.median_price,
        days_on_market: args.days_on_market,
        pending_ratio: args.pending_ratio,
    };
    data.validate()?;

    let score = evaluate_market(&data);
    render_market(&data, &score);
    Ok(())
}

pub(crate) fn run_deal_report(args: DealArgs) -> Result<(), AppError> {
    let input = DealInput {
        address: args.address,
        list_price: args.list_price,
        zestimate: args.zestimate,
        repair_estimate: args.repair_estimate,
        arv: args.arv,
        keywords: args.keywords,
        days_on_market: args.days_on_market,
        seller_motivation: args.seller_motivation,
    };
    input.validate()?;

    let analysis = analyze_deal(&input);
    render_deal(&input, &analysis);

    let flip = FlipRequest {
        purchase_price: analysis.qualifier_price_80,
        repair_cost: input.repair_estimate,
        arv: input.arv,
        holding_months: args.holding_months,
    };
    flip.validate()?;
    let projection = flip.project();
    println!(
        "\nFlip at qualifier price ({} months held)",
        args.holding_months
    );
    println!(
        "  Investment ${} | Holding ${} | Selling ${}",
        format_usd(projection.total_investment),
        format_usd(projection.holding_costs),
        format_usd(projection.selling_costs)
    );
    println!(
        "  Profit ${} | ROI {}%",
        format_usd(projection.profit),
        projection.roi_pct
    );

    if let Some(monthly_rent) = args.monthly_rent {
        let rental = RentalRequest {
            purchase_price: analysis.qualifier_price_80,
            monthly_rent,
            repair_cost: input.repair_estimate,
        };
        rental.validate()?;
        let cashflow = rental.project();
        println!("\nBuy and hold at ${}/mo rent", format_usd(monthly_rent));
        println!(
            "  Net cashflow ${}/mo | ${}/yr | Cash-on-cash {}%",
            format_usd(cashflow.net_cashflow),
            format_usd(cashflow.annual_cashflow),
            cashflow.cash_on_cash_return_pct
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        sender_name,
        skip_outreach,
    } = args;
    let sender_name = sender_name.unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());

    let service = PipelineService::new(
        Arc::new(InMemoryPipelineRepository::default()),
        Arc::new(InMemoryKpiRepository::default()),
    );

    println!("Wholesaling workflow demo");

    let market = sample_market();
    let saved_market = service.save_market(market.clone())?;
    render_market(&market, &evaluate_market(&market));
    if saved_market.is_non_disclosure {
        println!("  Note: non-disclosure state, sold prices come from agents or MLS access");
    }

    let listing_text = "Motivated seller, vacant and needs TLC. Estate sale priced to sell.";
    let keywords: Vec<String> = detect_keywords(listing_text)
        .into_iter()
        .map(str::to_string)
        .collect();

    let draft = LeadDraft {
        address: "9101 E 50th St, Kansas City, MO 64133".to_string(),
        city: "Kansas City".to_string(),
        state: Some(UsState::Missouri),
        list_price: 100_000.0,
        zestimate: 120_000.0,
        asking_price: 95_000.0,
        seller_name: "Dana Whitfield".to_string(),
        seller_phone: "8165550142".to_string(),
        seller_email: "dana@example.com".to_string(),
        lead_source: LeadSource::Zillow,
        keywords: keywords.clone(),
        arv: 160_000.0,
        repair_estimate: 20_000.0,
        ..LeadDraft::default()
    };
    let lead = service.add_lead(draft.clone())?;
    println!("\nLead {} added from {:?}", lead.id.0, lead.details.lead_source);

    let links = ListingLinks::for_address(&lead.details.address, None, None, None);
    println!("  Zillow: {}", links.zillow);
    println!("  Owner lookup: {}", links.true_people);

    let deal = DealInput {
        address: draft.address.clone(),
        list_price: draft.list_price,
        zestimate: draft.zestimate,
        repair_estimate: draft.repair_estimate,
        arv: draft.arv,
        keywords,
        days_on_market: 75,
        seller_motivation: 8,
    };
    let saved_deal = service.save_deal(SaveDealRequest {
        deal: deal.clone(),
        linked_lead_id: Some(lead.id.clone()),
    })?;
    println!();
    render_deal(&deal, &saved_deal.analysis);

    let qualified = service.qualify(QualifyLeadRequest {
        lead: LeadDraft {
            mao: saved_deal.analysis.mao,
            ..draft
        },
        answers: LeadQualificationInput {
            is_owner: true,
            is_motivated: true,
            is_listed_fsbo: false,
            is_listed_mls: false,
            is_under_contract: false,
            asking_price_ratio: asking_price_ratio(95_000.0, 120_000.0),
            seller_motivation: 8,
            sale_timeline_days: 45,
            state: UsState::Missouri,
        },
    })?;
    println!(
        "\nQualification: {} ({})",
        qualified.qualification.badge.label(),
        qualified.lead.details.notes
    );
    for reason in &qualified.qualification.reasons {
        println!("  - {reason}");
    }

    if !skip_outreach {
        let scripts = OutreachScripts::generate(
            &sender_name,
            &qualified.lead.details.address,
            saved_deal.analysis.qualifier_price_80,
        );
        let batch = OutreachBatch {
            emails: vec![EmailMessage {
                to: qualified.lead.details.seller_email.clone(),
                subject: format!("Cash offer for {}", links.address.street),
                body: scripts.email.clone(),
                kind: "email-1".to_string(),
                send_delay: "immediately".to_string(),
            }],
            sms_messages: vec![
                SmsMessage {
                    to: qualified.lead.details.seller_phone.clone(),
                    message: scripts.sms.clone(),
                    kind: "sms-1".to_string(),
                    send_delay: "immediately".to_string(),
                },
                SmsMessage {
                    to: qualified.lead.details.seller_phone.clone(),
                    message: "Just checking back in on the property. Still open to a cash offer?"
                        .to_string(),
                    kind: "sms-2".to_string(),
                    send_delay: "+3 days".to_string(),
                },
            ],
            sender_name: Some(sender_name.clone()),
            send_immediate: true,
        };

        let desk = OutreachDesk::new(sender_name);
        let report = desk.dispatcher.dispatch(&batch, Utc::now());
        println!(
            "\nOutreach batch: {} total, {} links ready, {} scheduled, {} errors",
            report.summary.total,
            report.results.len() - report.summary.scheduled - report.summary.errors,
            report.summary.scheduled,
            report.summary.errors
        );
        for result in &report.results {
            println!(
                "  {:?} to {} -> {:?}{}",
                result.channel,
                result.to,
                result.status,
                result
                    .scheduled_at
                    .map(|at| format!(" at {}", at.format("%Y-%m-%d %H:%M UTC")))
                    .unwrap_or_default()
            );
        }
        service.record_outreach(Some(&lead.id), report.summary.total - report.summary.errors)?;
        service.update_status(&lead.id, LeadStatus::OfferSent)?;
    }

    service.toggle_checklist(ChecklistItem::ALL[0])?;
    let report = service.kpi()?;
    render_kpis(&report);

    let summary = service.summary()?;
    println!(
        "\nPipeline: {} leads ({} active), spread ${}",
        summary.total_leads,
        summary.active_leads,
        format_usd(summary.pipeline_spread)
    );

    Ok(())
}

fn sample_market() -> MarketData {
    MarketData {
        city: "Kansas City".to_string(),
        state: UsState::Missouri,
        msa_population: 2_200_000.0,
        city_population: 508_000.0,
        median_price: 235_000.0,
        days_on_market: 28.0,
        pending_ratio: 32.0,
    }
}

fn render_market(data: &MarketData, score: &MarketScore) {
    println!(
        "Market {}, {}: {} ({}/100)",
        data.city,
        data.state.code(),
        score.status.label(),
        score.score
    );
    for check in &score.passed {
        println!("  + {check}");
    }
    for flag in &score.flags {
        println!("  - {flag}");
    }
}

fn render_deal(input: &DealInput, analysis: &DealAnalysis) {
    println!("Deal {}", input.address);
    println!(
        "  Qualifier (80%) ${} | Zestimate check (90%) ${}",
        format_usd(analysis.qualifier_price_80),
        format_usd(analysis.zestimate_check_90)
    );
    println!(
        "  MAO ${} | Spread ${} | Motivation {}/10",
        format_usd(analysis.mao),
        format_usd(analysis.spread_potential),
        analysis.motivation_score
    );
    if !analysis.matched_keywords.is_empty() {
        println!("  Keywords: {}", analysis.matched_keywords.join(", "));
    }
    for flag in &analysis.flags {
        println!("  ! {flag}");
    }
}

fn render_kpis(report: &KpiReport) {
    println!(
        "\nDaily KPIs for {} ({:.0}% of targets, checklist {:.0}%)",
        report.snapshot.date, report.progress_pct, report.checklist_progress_pct
    );
    for metric in KpiMetric::ALL {
        let value = report.snapshot.get(metric);
        let target = report.targets.target(metric);
        if metric.is_currency() {
            println!(
                "  {:<20} ${} / ${}",
                metric.label(),
                format_usd(value),
                format_usd(target)
            );
        } else {
            println!("  {:<20} {} / {}", metric.label(), value, target);
        }
    }
}
