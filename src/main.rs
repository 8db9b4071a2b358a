mod api;
mod app;
mod check;
mod cli;
mod error;
mod event;
mod model;
mod storage;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::process;
use std::sync::Arc;

use clap::Parser;
use ratatui::DefaultTerminal;

use api::{MemoryStore, RecordStore, RestStore};
use app::App;
use cli::{Cli, Commands};

/// 启动 TUI 界面
fn run_tui(mock: bool) -> io::Result<()> {
    let config = storage::config::load_config();

    // 选择后端：--mock 走内存 store，否则要求配置齐全
    let store: Arc<dyn RecordStore> = if mock {
        Arc::new(MemoryStore::with_samples())
    } else {
        let result = check::check_config(&config);
        if !result.ok {
            eprintln!("Jotter is not configured yet:\n");
            for err in &result.errors {
                eprintln!("  ✗ {}", err);
            }
            eprintln!("\nRun `jotter init --url <url> --key <key>` first.");
            process::exit(1);
        }
        Arc::new(RestStore::new(
            &config.store.url,
            &config.store.api_key,
            &config.store.table,
        ))
    };

    // 初始化终端
    let mut terminal = ratatui::init();

    // 创建应用，首次整表加载
    let mut app = App::new(store, theme::Theme::from_name(&config.theme.name));
    app.refresh();

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    result
}

fn main() -> io::Result<()> {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tui { mock }) => run_tui(mock)?,
        Some(Commands::Init { url, key, table }) => cli::init::execute(url, key, table),
        // 无子命令：默认 TUI
        None => run_tui(false)?,
    }

    Ok(())
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        // 检查 Finish All 后台批次是否完成（完成后整表重载 + 弹确认）
        app.poll_finish_result();

        // 渲染界面
        terminal.draw(|frame| ui::render(frame, app))?;

        // 处理事件
        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}
