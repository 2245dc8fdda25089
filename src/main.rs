//! # 剪贴板图片保存工具 — 应用入口
//!
//! 终端版界面：从标准输入读取命令，对应桌面版的两个按钮与关闭窗口。
//!
//! - `start` — 开始监控
//! - `stop`  — 停止监控
//! - `quit`  — 退出
//!
//! 状态事件由独立线程从通道取出并打印，监控线程不直接写终端。

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use clipboard_image_saver::{ArboardReader, MonitorConfig, MonitorController, StatusEvent};

fn print_status(event: &StatusEvent) {
    match serde_json::to_string(event) {
        Ok(payload) => println!("[{}] {}", event, payload),
        Err(err) => {
            log::warn!("序列化状态事件失败: {err}");
            println!("[{}]", event);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = MonitorConfig::default();
    log::info!("输出目录: {}", config.output_dir.display());

    let (mut controller, events) = MonitorController::with_channel(config, Arc::new(ArboardReader::new()));

    // 状态栏渲染线程
    let printer = thread::spawn(move || {
        println!("[待机中]");
        for event in events {
            print_status(&event);
        }
    });

    println!("命令: start / stop / quit");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("读取标准输入失败: {err}");
                break;
            }
        };

        let result = match line.trim() {
            "start" => controller.start(),
            "stop" => controller.stop(),
            "quit" | "exit" => break,
            "" => continue,
            other => {
                println!("未知命令: {other}（可选：start / stop / quit）");
                continue;
            }
        };

        if let Err(err) = result {
            println!("操作失败: {err}");
        }
    }

    // 丢弃控制器即发出停止信号，并关闭事件通道
    drop(controller);
    if printer.join().is_err() {
        log::warn!("状态输出线程异常退出");
    }
}
