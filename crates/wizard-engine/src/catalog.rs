//! The built-in "SmartLaunch Co-Founder" questionnaire.

use crate::config::Messages;
use crate::spec::{StepDefinition, StepKind, StepRegistry};

fn options(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

pub fn default_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new("name", "お名前", StepKind::Text { min_len: 2 })
            .with_hint("診断レポートの宛名になります")
            .with_prompt("こんにちは！まずはお名前を教えてください。")
            .with_placeholder("山田太郎")
            .with_message("2文字以上で入力してください。"),
        StepDefinition::new("email", "ご連絡先", StepKind::Email)
            .with_hint("診断結果の送信先に利用します")
            .with_prompt("診断結果のサマリーをお届けするメールアドレスを入力してください。")
            .with_placeholder("you@example.com")
            .with_message("メールアドレスの形式で入力してください。"),
        StepDefinition::new(
            "location",
            "活動エリア",
            StepKind::Choice {
                options: options(&["日本国内", "アジア圏（日本以外）", "北米", "欧州", "その他"]),
            },
        )
        .with_hint("市場選定の参考にします")
        .with_prompt("現在拠点にしている地域はどちらですか？"),
        StepDefinition::new(
            "role",
            "現在の肩書き",
            StepKind::Choice {
                options: options(&["起業準備中", "新規事業担当", "フリーランス", "学生", "その他"]),
            },
        )
        .with_hint("職種や職務を教えてください")
        .with_prompt("現在のご状況に最も近い肩書きを選んでください。"),
        StepDefinition::new(
            "skills",
            "得意領域",
            StepKind::Multi {
                options: options(&[
                    "プロダクト開発（エンジニアリング）",
                    "AI・データサイエンス",
                    "事業開発・BizDev",
                    "営業・アライアンス",
                    "マーケティング・グロース",
                    "デザイン・UX",
                    "資金調達・ファイナンス",
                ]),
            },
        )
        .with_hint("複数選択できます")
        .with_prompt("どの領域に強みがありますか？当てはまるものをすべて選んでください。")
        .with_message("少なくとも1つ選択してください。"),
        StepDefinition::new("problem", "解決したい課題", StepKind::Textarea)
            .with_hint("自由記述（200文字程度）")
            .with_prompt("今、解決したい課題や不満はどんなことですか？背景も併せて教えてください。")
            .with_placeholder(
                "例：ホワイトカラーの単純作業を削減したい。特に採用周りでのドキュメント整理に1日2時間以上取られている。",
            ),
        StepDefinition::new("audience", "想定ユーザー", StepKind::Textarea)
            .with_hint("セグメントを具体的に")
            .with_prompt(
                "その課題に直面しているのはどのようなユーザー（顧客層）ですか？可能であれば属性も教えてください。",
            )
            .with_placeholder("例：従業員50〜300名のスタートアップの採用責任者。SaaSに抵抗はない。"),
        StepDefinition::new(
            "goal",
            "達成したいゴール",
            StepKind::Choice {
                options: options(&[
                    "副業レベルでの収益化",
                    "スタートアップ起業（資金調達含む）",
                    "新規事業として社内導入",
                    "アイデア検証から始めたい",
                ]),
            },
        )
        .with_hint("今後12か月の目標")
        .with_prompt("今後12か月で実現したい状態に最も近いものを選んでください。"),
        StepDefinition::new(
            "timeline",
            "動き始めるタイミング",
            StepKind::Choice {
                options: options(&["今すぐ", "1〜3か月以内", "半年以内", "時期は未定"]),
            },
        )
        .with_hint("最適なNext Actionを提案します")
        .with_prompt("どのくらいのスピード感で動き始めたいですか？"),
    ]
}

pub fn default_registry() -> StepRegistry {
    // The built-in steps satisfy every registry invariant.
    StepRegistry::new(default_steps()).expect("built-in catalog is valid")
}

pub fn default_messages() -> Messages {
    Messages {
        greeting: "SmartLaunch Co-Founderへようこそ。これから数分で、あなたに最適なAI起業アイデアのヒントを見つけましょう。".into(),
        revisit: "{title}を修正しましょう。".into(),
        completion: "診断が完了しました。以下のサマリーを参考に、次のアクションを検討してみましょう。".into(),
        summary_heading: "診断サマリー".into(),
        summary_description: "入力内容をもとに、次のステップに役立つ提案をまとめました。チームやメンターと共有して議論を進めてみましょう。".into(),
        recommendations_heading: "おすすめのNext Action".into(),
        recommendations: vec![
            "回答内容を踏まえたアイデア候補を3案ピックアップしてみましょう。".into(),
            "想定ユーザーへのヒアリングを2件スケジュールし、課題の深堀りを行います。".into(),
            "強みを活かした最初のMVPスコープを描き、必要リソースを棚卸しします。".into(),
        ],
        export_header: "SmartLaunch Co-Founder 診断サマリー".into(),
        submit_label: "送信".into(),
        confirm_label: "選択を確定".into(),
        restart_label: "別の診断をはじめる".into(),
        copy_label: "サマリーをコピー".into(),
        copied_label: "コピーしました！".into(),
        copy_failed_label: "コピーに失敗しました".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_nine_ordered_steps() {
        let registry = default_registry();
        let ids: Vec<_> = registry.steps().iter().map(|step| step.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "name", "email", "location", "role", "skills", "problem", "audience", "goal",
                "timeline"
            ]
        );
    }
}
