//! Common test utilities for ng-html-data integration tests
//!
//! - `TestRepo` builder for laying out a small Angular project on disk
//! - `run` for invoking the built binary inside it

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A throwaway project directory
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative`, creating parent directories
    pub fn add_file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
        fs::write(path, content).expect("write file");
        self
    }

    pub fn file(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.file(relative)).expect("read file")
    }

    /// Run the CLI with this repo as working directory
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ng-html-data"))
            .args(args)
            .current_dir(self.path())
            .env_remove("NG_HTML_DATA_CONFIG")
            .env_remove("NG_HTML_DATA_LOG")
            .output()
            .expect("run ng-html-data")
    }
}

pub const CARD_COMPONENT: &str = r#"
import { Component, EventEmitter, Input, Output } from '@angular/core';

/**
 * A card with a header.
 * @see CardHeader
 */
@Component({
  selector: 'app-card',
  template: '<ng-content></ng-content>',
})
export class CardComponent {
  /** Heading text. */
  @Input() heading = '';

  /** Emits when the card is dismissed. */
  @Output() dismissed = new EventEmitter<void>();

  private open = true;
}
"#;

pub const TOOLTIP_DIRECTIVE: &str = r#"
import { Directive, Input } from '@angular/core';

/** Shows a tooltip on hover. */
@Directive({ selector: '[appTooltip]' })
export class TooltipDirective {
  @Input() appTooltip = '';
}
"#;
